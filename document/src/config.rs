/// How the binder treats unexpected segments and ambiguous hierarchies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrictMode {
    /// Unexpected segments and ambiguous hierarchies are silently appended/resolved.
    Off,
    /// They are appended/resolved but recorded as `Diagnostic`s.
    #[default]
    Warn,
    /// They abort the parse with a `BindError`.
    Fail,
}

/// Delimiters to use when serializing, overriding whatever was discovered on parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomDelimiters {
    pub element: u8,
    pub component: u8,
    pub repetition: u8,
    pub segment: u8,
}

/// Knobs enumerated by the external interface: strictness, pretty-printing,
/// delimiter overrides on serialization, and the two-digit year pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinderConfig {
    pub strict_mode: StrictMode,
    pub use_new_lines_on_emit: bool,
    pub custom_delimiters: Option<CustomDelimiters>,
    pub century_pivot: u8,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            strict_mode: StrictMode::default(),
            use_new_lines_on_emit: false,
            custom_delimiters: None,
            century_pivot: x12_schema::DEFAULT_CENTURY_PIVOT,
        }
    }
}
