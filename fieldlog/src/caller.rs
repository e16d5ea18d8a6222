//! Call-site attribution by walking the active stack

use crate::Fields;
use serde_json::json;
use std::path::Path;

/// Depth used by every public leveled entry point: the resolver's own frame
/// is 0, the leveled function is 1, and the code that called it is 2.
///
/// Entry points must call [`CallerResolver::resolve`] directly. Adding or
/// removing a frame between them shifts attribution by one frame without
/// any visible error.
pub const CALLER_DEPTH: usize = 2;

const RESOLVE_SYMBOL: &str = "CallerResolver::resolve";

/// Source location of the code that issued a log call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// `<basename>:<line>`
    pub file: String,
    /// Qualified function name without the symbol hash
    pub func: String,
}

impl Caller {
    /// Insert `file` and `func`, replacing any caller-supplied values
    pub fn merge_into(&self, fields: &mut Fields) {
        fields.insert("file".to_string(), json!(self.file));
        fields.insert("func".to_string(), json!(self.func));
    }
}

/// Resolves the frame a fixed number of frames above itself
#[derive(Debug, Clone, Copy)]
pub struct CallerResolver {
    skip: usize,
}

impl Default for CallerResolver {
    fn default() -> Self {
        Self::new(CALLER_DEPTH)
    }
}

impl CallerResolver {
    pub fn new(skip: usize) -> Self {
        Self { skip }
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    /// Walk the stack and describe the frame `skip` levels above this call.
    ///
    /// Returns `None` when the frame does not exist or carries no symbol,
    /// file, or line information (for example a binary built without debug
    /// info).
    #[inline(never)]
    pub fn resolve(&self) -> Option<Caller> {
        let mut walk = FrameWalk::new(self.skip);

        backtrace::trace(|frame| {
            let mut symbols = Vec::new();
            backtrace::resolve_frame(frame, |symbol| {
                let location = match (symbol.filename(), symbol.lineno()) {
                    (Some(path), Some(line)) => Some(format_location(path, line)),
                    _ => None,
                };
                symbols.push(FrameSymbol {
                    name: symbol.name().map(|n| format!("{:#}", n)),
                    location,
                });
            });

            walk.visit(&symbols)
        });

        walk.finish()
    }
}

/// One symbol of a physical frame. Inlined functions share a frame, innermost first.
#[derive(Debug, Clone, Default)]
struct FrameSymbol {
    name: Option<String>,
    location: Option<String>,
}

impl FrameSymbol {
    fn to_caller(&self) -> Option<Caller> {
        let func = self.name.clone()?;
        let file = self.location.clone()?;
        Some(Caller { file, func })
    }
}

/// Counts frames from the resolver's own frame up to the requested depth.
///
/// The anchor may be any symbol of a frame: optimised builds inline the
/// stack walker into the resolver, which pushes the resolver's symbol off
/// the innermost position.
#[derive(Debug)]
struct FrameWalk {
    skip: usize,
    depth: Option<usize>,
    caller: Option<Caller>,
}

impl FrameWalk {
    fn new(skip: usize) -> Self {
        Self {
            skip,
            depth: None,
            caller: None,
        }
    }

    /// Feed the next frame, innermost frame first. Returns whether to keep walking.
    fn visit(&mut self, symbols: &[FrameSymbol]) -> bool {
        let depth = match self.depth {
            Some(depth) => depth + 1,
            None => {
                let Some(anchor) = symbols
                    .iter()
                    .find(|s| s.name.as_deref().is_some_and(is_resolver_frame))
                else {
                    return true;
                };
                if self.skip == 0 {
                    self.caller = anchor.to_caller();
                    return false;
                }
                0
            }
        };
        self.depth = Some(depth);

        if depth < self.skip {
            return true;
        }
        self.caller = symbols.first().and_then(FrameSymbol::to_caller);
        false
    }

    fn finish(self) -> Option<Caller> {
        self.caller
    }
}

// v0-mangled names render inherent methods as `<path::Type>::method`.
fn is_resolver_frame(name: &str) -> bool {
    let plain: String = name.chars().filter(|c| !matches!(c, '<' | '>')).collect();
    plain.ends_with(RESOLVE_SYMBOL)
}

fn format_location(path: &Path, line: u32) -> String {
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned());
    format!("{}:{}", file, line)
}
