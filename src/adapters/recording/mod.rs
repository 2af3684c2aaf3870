//! Recording adapters that capture interactions to cassettes.

pub mod clock;
pub mod command;
pub mod id_gen;

pub use clock::RecordingClock;
pub use command::RecordingCommandRunner;
pub use id_gen::RecordingIdGenerator;

use serde::Serialize;

use crate::cassette::session::SharedRecorder;

/// Record an interaction with a plain return value.
///
/// Values that fail to serialize are recorded as `null` and logged; a
/// broken recording must not break the command being recorded.
pub(crate) fn record_interaction<I, O>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let input_json = to_json(port, method, input);
    let output_json = to_json(port, method, output);
    push(recorder, port, method, input_json, output_json);
}

/// Record a `Result<T, E>` interaction as `{"Ok": v}` or `{"Err": e}`.
///
/// Errors are stored structurally so the replaying side can rebuild the
/// exact variant.
pub(crate) fn record_result<T, E, I>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: Serialize,
    I: Serialize,
{
    let input_json = to_json(port, method, input);
    let output_json = match result {
        Ok(v) => serde_json::json!({ "Ok": to_json(port, method, v) }),
        Err(e) => serde_json::json!({ "Err": to_json(port, method, e) }),
    };
    push(recorder, port, method, input_json, output_json);
}

fn to_json<T: Serialize>(port: &str, method: &str, value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        log::warn!("could not serialize {port}::{method} for recording: {e}");
        serde_json::Value::Null
    })
}

fn push(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: serde_json::Value,
    output: serde_json::Value,
) {
    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input, output),
        Err(e) => log::warn!("recorder for {port} poisoned, dropping {method}: {e}"),
    }
}
