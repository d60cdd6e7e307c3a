/// 新选科目的默认重要度
pub const DEFAULT_IMPORTANCE: u8 = 3;

/// 重要度下限（含）
pub const MIN_IMPORTANCE: u8 = 1;

/// 重要度上限（含）
pub const MAX_IMPORTANCE: u8 = 5;

/// 默认每日科目数
pub const DEFAULT_DAILY_SUBJECTS: u32 = 3;

/// 每日科目数上限（HTTP 层校验）
pub const MAX_DAILY_SUBJECTS: u32 = 10;

/// 计划最长天数（HTTP 层校验）
pub const MAX_HORIZON_DAYS: u32 = 366;

/// 单个时段内避免重复抽取的最大尝试次数
pub const MAX_PICK_ATTEMPTS: u32 = 10;

/// 科目名最大字符数
pub const MAX_SUBJECT_NAME_CHARS: usize = 64;

/// 内存中同时存在的会话数上限
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

/// 单个会话可选科目数上限
pub const MAX_SUBJECTS_PER_SESSION: usize = 50;

/// 会话闲置多久后被清理（秒）
pub const DEFAULT_SESSION_IDLE_TTL_SECS: u64 = 6 * 60 * 60;

/// 闲置会话清理任务的执行间隔（秒）
pub const DEFAULT_SESSION_SWEEP_INTERVAL_SECS: u64 = 5 * 60;
