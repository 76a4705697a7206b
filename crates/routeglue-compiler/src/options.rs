/// How far read-only / write-only filtering descends into a schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterDepth {
    /// Only the top-level property set (or `items` for arrays).
    #[default]
    Shallow,
    /// Also nested `properties`, `items`, `additionalProperties` and
    /// `allOf`/`anyOf`/`oneOf` members.
    Recursive,
}

impl FilterDepth {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "shallow" => Some(Self::Shallow),
            "recursive" => Some(Self::Recursive),
            _ => None,
        }
    }
}

/// Options for compilation.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Read-only / write-only filter depth (default: shallow).
    pub filter_depth: FilterDepth,
    /// Emit a `required` array in each parameter location schema.
    /// Off by default: parameter-level `required` flags are not carried over.
    pub derive_required_parameters: bool,
    /// URL prefix prepended to every routing pattern.
    pub prefix: Option<String>,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter_depth(mut self, depth: FilterDepth) -> Self {
        self.filter_depth = depth;
        self
    }

    pub fn with_required_parameters(mut self, derive: bool) -> Self {
        self.derive_required_parameters = derive;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}
