//! Tracing session and the host dispatch hook
//!
//! A [`TracingSession`] is installed by the host runtime as its
//! operation-interception handler for a scoped region. Every dispatched
//! primitive operation is captured into an append-only store and, in
//! verbose mode, its rendering streams to stdout immediately. The
//! intercepted operation itself always runs and its result is returned
//! unchanged; the session never alters, delays, retries, or suppresses
//! it.
//!
//! Capture is single-threaded and synchronous: the hook is a direct
//! call-through within the host's own call stack, so store order is
//! exactly interception order. Hosts with multiple dispatching threads
//! must serialize access externally.

use crate::dtype::{Dtype, DtypeAbbrevs};
use crate::error::Result;
use crate::op::{format_call, OpIdent};
use crate::stack::{capture_context, StackProvider};
use crate::trace::{colorize, render, TraceRecord};
use crate::value::ArgValue;

/// Session configuration
#[derive(Debug, Clone, PartialEq)]
pub struct TraceConfig {
    /// Stream each record's rendering to stdout as it is captured
    pub verbose: bool,
    /// Path fragments identifying the host runtime's own source tree;
    /// frames whose file path contains one are dropped at capture
    pub runtime_markers: Vec<String>,
    /// Abbreviation table used when summarizing arguments
    pub abbrevs: DtypeAbbrevs,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            verbose: true,
            runtime_markers: Vec::new(),
            abbrevs: DtypeAbbrevs::default(),
        }
    }
}

impl TraceConfig {
    /// Config that records without streaming
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            verbose: false,
            ..Self::default()
        }
    }
}

/// One primitive operation invocation as delivered by the dispatch hook
#[derive(Debug, Clone, Copy)]
pub struct OpCall<'a> {
    /// Operation identifier
    pub op: &'a OpIdent,
    /// Element kinds participating in the dispatch; carried for hook
    /// parity and not consumed by the tracer
    pub types: &'a [Dtype],
    /// Positional arguments
    pub args: &'a [ArgValue],
    /// Keyword arguments, insertion-ordered
    pub kwargs: &'a [(String, ArgValue)],
}

/// Operation-interception handler expected by the host dispatch hook
///
/// The host runtime invokes the handler once per primitive operation.
/// The handler must execute the operation via `execute` and hand its
/// result back unchanged.
pub trait DispatchHandler {
    /// Handle one dispatched operation
    ///
    /// # Errors
    ///
    /// Returns [`crate::RastroError::UnsupportedDtype`] when an argument
    /// cannot be summarized; the operation does not run in that case.
    fn dispatch<R, F>(&mut self, call: OpCall<'_>, execute: F) -> Result<R>
    where
        F: FnOnce() -> R;
}

/// Scoped trace controller owning the append-only trace store
///
/// The store lives as long as the session and is discarded with it. All
/// external access is construction-via-append (through dispatch) and
/// read-via-render; records are never edited in place.
///
/// # Examples
///
/// ```
/// use rastro::{
///     ArgValue, DispatchHandler, Dtype, OpCall, OpIdent, RawFrame, StackProvider, TensorMeta,
///     TraceConfig, TracingSession,
/// };
///
/// struct OneFrame;
///
/// impl StackProvider for OneFrame {
///     fn capture(&self) -> Vec<RawFrame> {
///         vec![RawFrame {
///             file: "model.rs".to_string(),
///             line: 42,
///             function: "forward".to_string(),
///             source_line: Some("let y = x.add(&b)?;".to_string()),
///         }]
///     }
/// }
///
/// let mut session = TracingSession::with_config(TraceConfig::quiet(), Box::new(OneFrame));
/// let op = OpIdent::Qualified("ops::add".to_string());
/// let x = ArgValue::Tensor(TensorMeta::new(Dtype::F32, vec![2, 3]));
///
/// let call = OpCall { op: &op, types: &[Dtype::F32], args: &[x.clone(), x], kwargs: &[] };
/// let sum = session.dispatch(call, || 6.0_f32).unwrap();
///
/// assert_eq!(sum, 6.0);
/// assert_eq!(session.len(), 1);
/// let block = session.render_trace(0).unwrap();
/// assert!(block.ends_with("add(f32[2, 3], f32[2, 3]);"));
/// ```
pub struct TracingSession {
    config: TraceConfig,
    stack: Box<dyn StackProvider>,
    traces: Vec<TraceRecord>,
    active: bool,
}

impl std::fmt::Debug for TracingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TracingSession")
            .field("config", &self.config)
            .field("traces", &self.traces.len())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl TracingSession {
    /// Create a session with default configuration (streaming on)
    #[must_use]
    pub fn new(stack: Box<dyn StackProvider>) -> Self {
        Self::with_config(TraceConfig::default(), stack)
    }

    /// Create a session with explicit configuration
    #[must_use]
    pub fn with_config(config: TraceConfig, stack: Box<dyn StackProvider>) -> Self {
        Self {
            config,
            stack,
            traces: Vec::new(),
            active: true,
        }
    }

    /// Whether the session is still capturing
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Stop capturing at region exit
    ///
    /// Immediate and total: nothing is in flight, so no partial records
    /// exist. The store stays readable; nothing more is appended.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Recorded traces, in interception order
    #[must_use]
    pub fn traces(&self) -> &[TraceRecord] {
        &self.traces
    }

    /// Number of recorded traces
    #[must_use]
    pub fn len(&self) -> usize {
        self.traces.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Render the record at `index`; negative counts from the end
    ///
    /// An empty store renders the `<no traces>` placeholder.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RastroError::TraceIndexOutOfRange`] when the
    /// index resolves outside the store.
    pub fn render_trace(&self, index: isize) -> Result<String> {
        render(&self.traces, index)
    }

    /// Print one record, colorized, to stdout
    ///
    /// # Errors
    ///
    /// Returns [`crate::RastroError::TraceIndexOutOfRange`] when the
    /// index resolves outside the store.
    pub fn print_trace(&self, index: isize) -> Result<()> {
        let rendered = self.render_trace(index)?;
        println!("{}", colorize(&rendered));
        Ok(())
    }

    /// Replay every recorded trace in capture order
    ///
    /// Output is identical to what verbose streaming emitted live, since
    /// rendering record `i` depends only on records `i` and `i - 1`.
    ///
    /// # Errors
    ///
    /// Propagates any rendering error; does not occur for a store built
    /// through dispatch.
    pub fn print(&self) -> Result<()> {
        for index in 0..self.traces.len() {
            self.print_trace(index as isize)?;
        }
        Ok(())
    }

    fn record(&mut self, call: &OpCall<'_>) -> Result<()> {
        let op = format_call(call.op, call.args, call.kwargs, &self.config.abbrevs)?;
        let context = capture_context(self.stack.capture(), &self.config.runtime_markers);
        self.traces.push(TraceRecord { op, context });
        if self.config.verbose {
            self.print_trace(-1)?;
        }
        Ok(())
    }
}

impl DispatchHandler for TracingSession {
    fn dispatch<R, F>(&mut self, call: OpCall<'_>, execute: F) -> Result<R>
    where
        F: FnOnce() -> R,
    {
        if self.active {
            self.record(&call)?;
        }
        Ok(execute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::RawFrame;

    struct FixedStack(Vec<RawFrame>);

    impl StackProvider for FixedStack {
        fn capture(&self) -> Vec<RawFrame> {
            self.0.clone()
        }
    }

    fn one_frame_stack() -> Box<FixedStack> {
        Box::new(FixedStack(vec![RawFrame {
            file: "model.rs".to_string(),
            line: 7,
            function: "forward".to_string(),
            source_line: Some("x.add(&y)".to_string()),
        }]))
    }

    #[test]
    fn test_dispatch_records_and_returns_result() {
        let mut session = TracingSession::with_config(TraceConfig::quiet(), one_frame_stack());
        let op = OpIdent::Qualified("ops::add".to_string());
        let call = OpCall {
            op: &op,
            types: &[],
            args: &[],
            kwargs: &[],
        };
        let result = session.dispatch(call, || 41 + 1).unwrap();
        assert_eq!(result, 42);
        assert_eq!(session.len(), 1);
        assert_eq!(session.traces()[0].op, "add()");
    }

    #[test]
    fn test_deactivated_session_appends_nothing() {
        let mut session = TracingSession::with_config(TraceConfig::quiet(), one_frame_stack());
        session.deactivate();
        assert!(!session.is_active());

        let op = OpIdent::Raw("mul".to_string());
        let call = OpCall {
            op: &op,
            types: &[],
            args: &[],
            kwargs: &[],
        };
        let result = session.dispatch(call, || "ran").unwrap();
        assert_eq!(result, "ran");
        assert!(session.is_empty());
    }

    #[test]
    fn test_formatting_failure_aborts_before_execute() {
        let config = TraceConfig {
            verbose: false,
            abbrevs: DtypeAbbrevs::empty(),
            ..TraceConfig::default()
        };
        let mut session = TracingSession::with_config(config, one_frame_stack());

        let op = OpIdent::Raw("add".to_string());
        let arg = ArgValue::Tensor(crate::value::TensorMeta::new(Dtype::F32, vec![2]));
        let args = [arg];
        let call = OpCall {
            op: &op,
            types: &[],
            args: &args,
            kwargs: &[],
        };

        let mut executed = false;
        let result = session.dispatch(call, || executed = true);
        assert!(result.is_err());
        assert!(!executed);
        assert!(session.is_empty());
    }

    #[test]
    fn test_render_empty_store_placeholder() {
        let session = TracingSession::with_config(TraceConfig::quiet(), one_frame_stack());
        assert_eq!(session.render_trace(-1).unwrap(), "<no traces>");
    }

    #[test]
    fn test_print_empty_store_is_ok() {
        let session = TracingSession::with_config(TraceConfig::quiet(), one_frame_stack());
        assert!(session.print().is_ok());
    }
}
