//! Builds notification envelopes from posts and trending candidates.

use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};
use crate::models::{
    AndroidConfig, AndroidNotification, ApnsConfig, ApnsPayload, Aps, Candidate,
    NotificationEnvelope, PostSubmission,
};

/// Click action understood by the Flutter client
pub const CLICK_ACTION: &str = "FLUTTER_NOTIFICATION_CLICK";

pub const TRENDING_TITLE: &str = "🔥 New Trending Phonk";

/// Longest post preview shown in the notification body, before the ellipsis
const BODY_PREVIEW_CHARS: usize = 50;

const DEFAULT_POST_TITLE_AUTHOR: &str = "Phonkers";
const DEFAULT_POST_AUTHOR: &str = "Anonymous";

const ANDROID_ICON: &str = "background";
const ANDROID_COLOR: &str = "#FF6B35";
const DEFAULT_SOUND: &str = "default";

#[derive(Debug, Clone)]
pub struct NotificationComposer {
    topic: String,
}

impl NotificationComposer {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Envelope announcing a new community post
    ///
    /// Fails with a `content` validation error when the post has no content.
    pub fn compose_from_post(&self, post: &PostSubmission) -> AppResult<NotificationEnvelope> {
        let content = non_empty(post.content.as_deref()).ok_or_else(|| AppError::Validation {
            field: "content".to_string(),
            reason: "Missing content".to_string(),
        })?;
        let author = non_empty(post.author.as_deref());

        let mut data = BTreeMap::new();
        data.insert("type".to_string(), "new_post".to_string());
        data.insert(
            "postId".to_string(),
            post.post_id.clone().unwrap_or_default(),
        );
        data.insert("postContent".to_string(), content.to_string());
        data.insert(
            "postAuthor".to_string(),
            author.unwrap_or(DEFAULT_POST_AUTHOR).to_string(),
        );
        data.insert(
            "postAuthorId".to_string(),
            non_empty(post.author_id.as_deref())
                .unwrap_or_default()
                .to_string(),
        );
        data.insert("timestamp".to_string(), timestamp());
        data.insert("clickAction".to_string(), CLICK_ACTION.to_string());

        Ok(NotificationEnvelope {
            topic: self.topic.clone(),
            title: format!(
                "{} posted 🎵",
                author.unwrap_or(DEFAULT_POST_TITLE_AUTHOR)
            ),
            body: preview(content),
            data,
            android: None,
            apns: None,
        })
    }

    /// Envelope announcing the selected trending track
    ///
    /// `total_count` is the number of candidates the selection was drawn from.
    pub fn compose_from_candidate(
        &self,
        candidate: &Candidate,
        total_count: usize,
    ) -> NotificationEnvelope {
        let thumbnail = candidate.thumbnail().unwrap_or_default();

        let mut data = BTreeMap::new();
        data.insert("phonkId".to_string(), candidate.id().to_string());
        data.insert("phonkTitle".to_string(), candidate.title().to_string());
        data.insert("phonkArtist".to_string(), candidate.artist().to_string());
        data.insert("phonkThumbnail".to_string(), thumbnail.to_string());
        data.insert("timestamp".to_string(), timestamp());
        data.insert("totalTrending".to_string(), total_count.to_string());
        data.insert("iconUrl".to_string(), thumbnail.to_string());
        data.insert("clickAction".to_string(), CLICK_ACTION.to_string());

        NotificationEnvelope {
            topic: self.topic.clone(),
            title: TRENDING_TITLE.to_string(),
            body: format!("{} - {}", candidate.artist(), candidate.title()),
            data,
            android: Some(AndroidConfig {
                notification: AndroidNotification {
                    icon: ANDROID_ICON.to_string(),
                    color: ANDROID_COLOR.to_string(),
                    sound: DEFAULT_SOUND.to_string(),
                },
            }),
            apns: Some(ApnsConfig {
                payload: ApnsPayload {
                    aps: Aps {
                        sound: DEFAULT_SOUND.to_string(),
                        badge: 1,
                    },
                },
            }),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// First 50 characters of `content`, with `...` appended when cut
fn preview(content: &str) -> String {
    match content.char_indices().nth(BODY_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

/// ISO-8601 UTC timestamp with millisecond precision
fn timestamp() -> String {
    format!("{:.3}", jiff::Timestamp::now())
}
