//! C ABI for the Wayfarer engine.
//!
//! One process-wide [`SessionHost`] backs every call, so hosts need no
//! handle. Strings passed in must be NUL-terminated UTF-8. Strings handed
//! out are owned by the caller and must be released with
//! [`wf_engine_free_string`].
//!
//! Functions returning `i32` use [`WfStatus`] codes. After a non-zero code,
//! [`wf_engine_last_error`] describes what went wrong.

use std::ffi::{CStr, CString, c_char};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::ptr;

use parking_lot::Mutex;
use wf_engine::{EngineError, SessionHost};

static HOST: SessionHost = SessionHost::new();

static LAST_ERROR: Mutex<Option<String>> = parking_lot::const_mutex(None);

/// Status codes returned across the C boundary.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WfStatus {
    /// The call succeeded.
    Ok = 0,
    /// A pointer argument was null or not valid UTF-8.
    InvalidArgument = 1,
    /// A campaign or character definition was rejected.
    SchemaError = 2,
    /// The choice is not visible at the current node.
    InvalidChoice = 3,
    /// No session has been initialized.
    NotInitialized = 4,
    /// Anything else, including a caught panic.
    InternalError = 5,
}

impl From<&EngineError> for WfStatus {
    fn from(err: &EngineError) -> Self {
        match err {
            EngineError::Schema(_) => WfStatus::SchemaError,
            EngineError::InvalidChoice { .. } => WfStatus::InvalidChoice,
            EngineError::NotInitialized => WfStatus::NotInitialized,
            EngineError::RedirectLoop { .. }
            | EngineError::MissingNode(_)
            | EngineError::UnknownMonster(_)
            | EngineError::Serialization(_) => WfStatus::InternalError,
        }
    }
}

fn set_last_error(message: String) {
    *LAST_ERROR.lock() = Some(message);
}

fn fail(status: WfStatus, message: String) -> i32 {
    tracing::warn!(?status, %message, "ffi call failed");
    set_last_error(message);
    status as i32
}

fn report(result: Result<(), EngineError>) -> i32 {
    match result {
        Ok(()) => WfStatus::Ok as i32,
        Err(err) => fail(WfStatus::from(&err), err.to_string()),
    }
}

/// Run `f`, turning a panic into [`WfStatus::InternalError`].
fn guarded(f: impl FnOnce() -> i32) -> i32 {
    catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|_| fail(WfStatus::InternalError, "engine panicked".to_string()))
}

/// Borrow a C string argument.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for `'a`.
unsafe fn read_arg<'a>(ptr: *const c_char, name: &str) -> Result<&'a str, i32> {
    if ptr.is_null() {
        return Err(fail(WfStatus::InvalidArgument, format!("{name} is null")));
    }
    // SAFETY: non-null and NUL-terminated per the caller's contract.
    let raw = unsafe { CStr::from_ptr(ptr) };
    raw.to_str()
        .map_err(|_| fail(WfStatus::InvalidArgument, format!("{name} is not valid UTF-8")))
}

fn into_c_string(text: String) -> *mut c_char {
    match CString::new(text) {
        Ok(s) => s.into_raw(),
        Err(_) => {
            set_last_error("string contains an interior NUL byte".to_string());
            ptr::null_mut()
        }
    }
}

/// Start a session, replacing any existing one.
///
/// On failure the previous session, if any, stays in place.
///
/// # Safety
///
/// `campaign_json` and `character_json` must each be null or point to a
/// NUL-terminated string valid for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn wf_engine_init(
    campaign_json: *const c_char,
    character_json: *const c_char,
    seed: u64,
) -> i32 {
    guarded(|| {
        // SAFETY: forwarded caller contract.
        let campaign = match unsafe { read_arg(campaign_json, "campaign_json") } {
            Ok(s) => s,
            Err(code) => return code,
        };
        // SAFETY: forwarded caller contract.
        let character = match unsafe { read_arg(character_json, "character_json") } {
            Ok(s) => s,
            Err(code) => return code,
        };
        report(HOST.initialize(campaign, character, seed))
    })
}

/// The current view as a JSON string, or null when no session exists.
///
/// Release the result with [`wf_engine_free_string`].
#[unsafe(no_mangle)]
pub extern "C" fn wf_engine_current_view() -> *mut c_char {
    catch_unwind(|| match HOST.current_view() {
        Ok(json) => into_c_string(json),
        Err(err) => {
            set_last_error(err.to_string());
            ptr::null_mut()
        }
    })
    .unwrap_or_else(|_| {
        set_last_error("engine panicked".to_string());
        ptr::null_mut()
    })
}

/// Take a visible choice at the current node.
///
/// # Safety
///
/// `choice_id` must be null or point to a NUL-terminated string valid for
/// the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn wf_engine_choose(choice_id: *const c_char) -> i32 {
    guarded(|| {
        // SAFETY: forwarded caller contract.
        let id = match unsafe { read_arg(choice_id, "choice_id") } {
            Ok(s) => s,
            Err(code) => return code,
        };
        report(HOST.choose(id))
    })
}

/// Drop the current session, if any.
#[unsafe(no_mangle)]
pub extern "C" fn wf_engine_teardown() {
    HOST.teardown();
}

/// 1 if a session is installed, 0 otherwise.
#[unsafe(no_mangle)]
pub extern "C" fn wf_engine_is_initialized() -> i32 {
    i32::from(HOST.is_initialized())
}

/// Description of the most recent failure, or null if nothing has failed.
///
/// Release the result with [`wf_engine_free_string`].
#[unsafe(no_mangle)]
pub extern "C" fn wf_engine_last_error() -> *mut c_char {
    match LAST_ERROR.lock().clone() {
        Some(message) => into_c_string(message),
        None => ptr::null_mut(),
    }
}

/// Release a string returned by this library. Null is ignored.
///
/// # Safety
///
/// `s` must be null or a pointer obtained from this library that has not
/// been freed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn wf_engine_free_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    // SAFETY: allocated by `CString::into_raw` in this crate.
    drop(unsafe { CString::from_raw(s) });
}
