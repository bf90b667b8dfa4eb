//! Built-in term lists.

/// Allow-keywords used when the store holds none.
pub const DEFAULT_ALLOW_KEYWORDS: &[&str] = &[
	"lecture",
	"tutorial",
	"how to",
	"course",
	"class",
	"lesson",
	"study",
	"explain",
	"explanation",
	"guide",
	"physics",
	"chemistry",
	"biology",
	"math",
	"mathematics",
	"algebra",
	"calculus",
	"engineering",
	"science",
	"programming",
	"coding",
	"khan academy",
	"crashcourse",
	"mit",
	"ocw",
	"coursera",
	"edx",
	"educational",
	"experiment",
	"revision",
	"exam",
	"notes",
	"concept",
	"topic",
	"university",
	"school",
];

/// Trusted channels used when the store holds none.
pub const DEFAULT_CHANNEL_WHITELIST: &[&str] = &[
	"Khan Academy",
	"CrashCourse",
	"MIT OpenCourseWare",
	"3Blue1Brown",
	"Computerphile",
	"Numberphile",
	"freeCodeCamp.org",
	"TED-Ed",
	"Kurzgesagt",
	"Veritasium",
	"MinutePhysics",
	"SmarterEveryDay",
];

/// Entertainment terms that veto any positive signal. Not configurable.
pub const ENTERTAINMENT_BLACKLIST: &[&str] = &[
	"prank",
	"challenge",
	"funny",
	"vlog",
	"reaction",
	"music video",
	"lyrics",
	"song",
	"meme",
	"dance",
	"gaming",
	"fortnite",
	"minecraft",
	"mrbeast",
	"clips",
	"shorts",
	"highlight",
	"trailer",
	"movie",
	"show",
	"asmr",
	"podcast",
	"stream",
	"celebrity",
	"tiktok",
	"standup",
	"roast",
	"roblox",
];
