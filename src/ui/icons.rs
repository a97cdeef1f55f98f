pub struct Icons;

impl Icons {
    pub const OIL: &str = "🛢️";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const STATS: &str = "📊";
    pub const UP: &str = "📈";
    pub const DOWN: &str = "📉";
    pub const CALENDAR: &str = "📅";
    pub const EVENT: &str = "📰";
    pub const FILE: &str = "📄";
    pub const GEAR: &str = "⚙️";
}
