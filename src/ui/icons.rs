pub struct Icons;

impl Icons {
    pub const SEARCH: &str = "🔍";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const CHIP: &str = "🔲";
    pub const HISTORY: &str = "🕘";
    pub const GLOBE: &str = "🌍";
    pub const EMPTY: &str = "∅";
}
