//! Startup banner and session summary display.

use crate::bot::SessionStats;

/// Service configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub bot: &'a str,
    pub captioner: &'a str,
    pub storage: &'a str,
    pub records: &'a str,
    pub publisher: &'a str,
}

/// Print the startup banner with service info.
pub fn print_banner(info: &BannerInfo) {
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║        N A N O   B A N A N A          ║
   ║    photo in, three captions out       ║
   ╚═══════════════════════════════════════╝

   version    {}
   bot        @{}
   captions   {}
   storage    {}
   records    {}
   publisher  {}
"#,
        env!("CARGO_PKG_VERSION"),
        info.bot,
        info.captioner,
        info.storage,
        info.records,
        info.publisher,
    );
}

/// Print the session summary (counters + farewell).
pub fn print_session_summary(stats: SessionStats) {
    if stats.messages > 0 {
        println!(
            "session: {} messages, {} photos, {} posts",
            stats.messages, stats.photos, stats.posts
        );
    }
    println!("goodbye.");
}
