/// Name of the persisted record holding the user's breakpoint overrides.
pub const BREAKPOINTS_SETTING: &str = "dynamic_breakpoints";

/// Built-in tablet breakpoint the bundled stylesheet was generated with.
pub const DEFAULT_TABLET: u32 = 1024;
/// Built-in mobile breakpoint the bundled stylesheet was generated with.
pub const DEFAULT_MOBILE: u32 = 768;

/// Priority of the default-override hooks and the breakpoint substitution filter.
pub const DEFAULT_PRIORITY: i32 = 10;
/// Shortcut expansion must run before breakpoint substitution.
pub const SHORTCUT_PRIORITY: i32 = 9;
