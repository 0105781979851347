// crates/portal-types/src/lib.rs
// Shared wire types for the portal and haiku backends (native + WASM compatible)
// No native-only dependencies allowed here

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════
// PAGINATION
// ═══════════════════════════════════════

/// Server-computed pagination block attached to every paginated response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub total_items: u32,
    #[serde(default)]
    pub items_per_page: u32,
}

impl Pagination {
    /// True when a later page exists
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// True when an earlier page exists
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// True on the final page, including the degenerate zero-page case
    pub fn is_last_page(&self) -> bool {
        !self.has_next()
    }

    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.current_page + 1)
    }

    pub fn previous_page(&self) -> Option<u32> {
        self.has_previous().then(|| self.current_page - 1)
    }
}

/// One server-paginated slice of a resource collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Wrap an unpaginated collection as page 1 of 1
    pub fn whole(items: Vec<T>) -> Self {
        let len = u32::try_from(items.len()).unwrap_or(u32::MAX);
        Self {
            items,
            pagination: Pagination {
                current_page: 1,
                total_pages: 1,
                total_items: len,
                items_per_page: len,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Items that carry a backend identifier.
///
/// The identifier is rendered as a string so numeric ids (portal) and
/// UUIDs (haiku service) share one optimistic-removal path.
pub trait Identified {
    fn identifier(&self) -> Option<String>;
}

// ═══════════════════════════════════════
// LANGUAGE PORTAL
// ═══════════════════════════════════════

/// Vocabulary word as listed by `/words` and `/groups/:id/words`.
///
/// Session word listings omit the id, hence the `Option`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    #[serde(default)]
    pub id: Option<i64>,
    pub japanese: String,
    pub romaji: String,
    pub english: String,
    #[serde(default)]
    pub correct_count: u32,
    #[serde(default)]
    pub wrong_count: u32,
}

impl Identified for Word {
    fn identifier(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub correct_count: u32,
    pub wrong_count: u32,
}

/// Lightweight group reference embedded in other records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub id: i64,
    pub name: String,
}

/// Single word with its review stats and group memberships (`/words/:id`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordDetail {
    pub japanese: String,
    pub romaji: String,
    pub english: String,
    #[serde(default)]
    pub stats: ReviewStats,
    #[serde(default)]
    pub groups: Vec<GroupRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub word_count: u32,
}

impl Identified for Group {
    fn identifier(&self) -> Option<String> {
        Some(self.id.to_string())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStats {
    pub total_word_count: u32,
}

/// Group header as returned by `/groups/:id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDetail {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub stats: GroupStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    pub id: i64,
    pub activity_name: String,
    pub group_name: String,
    pub start_time: String,
    /// Absent on the dashboard's last-session record
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub review_items_count: u32,
}

impl Identified for StudySession {
    fn identifier(&self) -> Option<String> {
        Some(self.id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyActivity {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl Identified for StudyActivity {
    fn identifier(&self) -> Option<String> {
        Some(self.id.to_string())
    }
}

/// Body of `POST /study_activities`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchRequest {
    pub group_id: i64,
    pub study_activity_id: i64,
}

/// Reply of `POST /study_activities`; `id` is the new study session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchResponse {
    pub id: i64,
    #[serde(default)]
    pub group_id: Option<i64>,
}

/// Body of `POST /study_sessions/:id/words/:word_id/review`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub correct: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QuickStats {
    #[serde(default)]
    pub success_rate: f64,
    #[serde(default)]
    pub total_study_sessions: u32,
    #[serde(default)]
    pub total_active_groups: u32,
    #[serde(default)]
    pub study_streak_days: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyProgress {
    pub total_words_studied: u32,
    pub total_available_words: u32,
}

impl StudyProgress {
    /// Share of available words studied at least once, rounded down
    pub fn percent(&self) -> u32 {
        if self.total_available_words == 0 {
            0
        } else {
            ((self.total_words_studied as u64 * 100) / self.total_available_words as u64) as u32
        }
    }
}

/// Reply of every admin reset endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

// ═══════════════════════════════════════
// HAIKU SERVICE
// ═══════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Haiku {
    pub haiku_id: String,
    pub status: String,
    pub error_message: String,
    pub haiku_line_en_1: String,
    pub haiku_line_en_2: String,
    pub haiku_line_en_3: String,
    pub image_description_1: String,
    pub image_description_2: String,
    pub image_description_3: String,
    pub image_link_1: String,
    pub image_link_2: String,
    pub image_link_3: String,
    pub haiku_line_ja_1: String,
    pub haiku_line_ja_2: String,
    pub haiku_line_ja_3: String,
    pub audio_link_1: String,
    pub audio_link_2: String,
    pub audio_link_3: String,
}

impl Haiku {
    /// English lines, only when all three are present
    pub fn english_lines(&self) -> Option<[&str; 3]> {
        let lines = [
            self.haiku_line_en_1.as_str(),
            self.haiku_line_en_2.as_str(),
            self.haiku_line_en_3.as_str(),
        ];
        lines.iter().all(|l| !l.is_empty()).then_some(lines)
    }

    pub fn japanese_lines(&self) -> Option<[&str; 3]> {
        let lines = [
            self.haiku_line_ja_1.as_str(),
            self.haiku_line_ja_2.as_str(),
            self.haiku_line_ja_3.as_str(),
        ];
        lines.iter().all(|l| !l.is_empty()).then_some(lines)
    }

    pub fn audio_links(&self) -> impl Iterator<Item = &str> {
        [&self.audio_link_1, &self.audio_link_2, &self.audio_link_3]
            .into_iter()
            .map(String::as_str)
            .filter(|l| !l.is_empty())
    }

    pub fn status(&self) -> HaikuStatus {
        HaikuStatus::from(self.status.as_str())
    }
}

impl Identified for Haiku {
    fn identifier(&self) -> Option<String> {
        (!self.haiku_id.is_empty()).then(|| self.haiku_id.clone())
    }
}

/// Generation status reported by the haiku backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HaikuStatus {
    New,
    Completed,
    Failed,
    Other(String),
}

impl From<&str> for HaikuStatus {
    fn from(s: &str) -> Self {
        match s {
            "new" => HaikuStatus::New,
            "completed" => HaikuStatus::Completed,
            "failed" => HaikuStatus::Failed,
            other => HaikuStatus::Other(other.to_string()),
        }
    }
}

impl HaikuStatus {
    pub fn as_str(&self) -> &str {
        match self {
            HaikuStatus::New => "new",
            HaikuStatus::Completed => "completed",
            HaikuStatus::Failed => "failed",
            HaikuStatus::Other(s) => s,
        }
    }
}

/// Chat ids are integers on the reference service, strings elsewhere
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatId::Number(n) => write!(f, "{n}"),
            ChatId::Text(s) => f.write_str(s),
        }
    }
}

/// One message in a haiku conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    #[serde(default)]
    pub chat_id: Option<ChatId>,
    #[serde(default)]
    pub haiku_id: String,
    pub role: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HaikuList {
    pub haikus: Vec<Haiku>,
}

/// Reply of `GET /haiku/:id`.
///
/// An unknown id yields `null`, `{}` or an empty record. Deployments that
/// keep no separate history route embed the transcript as `chats`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HaikuReply {
    #[serde(default)]
    pub haiku: Option<Haiku>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chats: Option<Vec<Chat>>,
}

/// Reply of `GET /chat/:id/history`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatHistory {
    #[serde(default)]
    pub messages: Vec<Chat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub chat: Chat,
    pub haiku: Haiku,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateMediaResponse {
    pub haiku: Haiku,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteHaikuResponse {
    #[serde(default)]
    pub message: String,
    /// The reference service answers with `detail` instead of `message`
    #[serde(default)]
    pub detail: String,
}

impl DeleteHaikuResponse {
    pub fn text(&self) -> &str {
        if self.message.is_empty() {
            &self.detail
        } else {
            &self.message
        }
    }
}
