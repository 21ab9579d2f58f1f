//! Threading of profile comments.
//!
//! Replies are kept two levels deep by [`place_reply`] when a comment is
//! written. [`thread_comments`] only follows the stored `parent_id` links.

use std::collections::HashMap;

use crate::models::{CommentThread, UserComment};

/// Name shown when the addressee of a reply has no profile name.
pub const UNKNOWN_AUTHOR: &str = "member";

/// Where a new comment is attached.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReplyPlacement {
    pub parent_id: Option<String>,
    /// Author of the reply being answered, set when the comment is lifted
    /// to the thread root.
    pub reply_to_user_id: Option<String>,
}

/// Decide the stored parent of a comment answering `target`.
///
/// Answering a top-level comment nests under it. Answering a reply attaches
/// to that reply's own parent and records the reply's author as addressee,
/// so a thread never grows past two levels.
pub fn place_reply(target: Option<&UserComment>) -> ReplyPlacement {
    match target {
        None => ReplyPlacement::default(),
        Some(target) => match &target.parent_id {
            Some(grandparent) => ReplyPlacement {
                parent_id: Some(grandparent.clone()),
                reply_to_user_id: Some(target.user_id.clone()),
            },
            None => ReplyPlacement {
                parent_id: Some(target.id.clone()),
                reply_to_user_id: None,
            },
        },
    }
}

/// Content as shown to readers, with the reply attribution in front.
pub fn display_content(comment: &UserComment) -> String {
    match &comment.reply_to_user_id {
        Some(_) => format!(
            "replying to {}: {}",
            comment.reply_to_name.as_deref().unwrap_or(UNKNOWN_AUTHOR),
            comment.content
        ),
        None => comment.content.clone(),
    }
}

/// Arrange a flat comment list into reply threads.
///
/// `comments` must be ordered by `created_at` ascending; the order is kept at
/// every level. A comment whose parent is not in the list is shown at the top
/// level. Comments caught in a parent cycle are also lifted to the top level
/// rather than dropped.
pub fn thread_comments(comments: Vec<UserComment>) -> Vec<CommentThread> {
    let len = comments.len();
    let mut replies: Vec<Vec<usize>> = vec![Vec::new(); len];
    let mut top_level = Vec::new();

    {
        let index: HashMap<&str, usize> = comments
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.as_str(), i))
            .collect();

        for (i, comment) in comments.iter().enumerate() {
            match comment.parent_id.as_deref().and_then(|id| index.get(id)) {
                Some(&parent) if parent != i => replies[parent].push(i),
                _ => top_level.push(i),
            }
        }
    }

    let mut slots: Vec<Option<UserComment>> = comments.into_iter().map(Some).collect();
    let mut threads: Vec<CommentThread> = top_level
        .into_iter()
        .filter_map(|i| build_thread(i, &mut slots, &replies))
        .collect();

    for i in 0..len {
        if let Some(thread) = build_thread(i, &mut slots, &replies) {
            tracing::debug!(comment_id = %thread.comment.id, "lifted comment out of parent cycle");
            threads.push(thread);
        }
    }

    threads
}

/// A thread under construction and the next reply index to visit.
struct Frame {
    index: usize,
    next: usize,
    thread: CommentThread,
}

/// Build the thread rooted at comment `i`, consuming every comment it
/// reaches from `slots`. Uses an explicit stack so nesting depth is bounded
/// by the heap, not the call stack.
fn build_thread(
    i: usize,
    slots: &mut [Option<UserComment>],
    replies: &[Vec<usize>],
) -> Option<CommentThread> {
    let root = slots[i].take()?;
    let mut stack = vec![Frame {
        index: i,
        next: 0,
        thread: CommentThread::from(root),
    }];

    loop {
        let frame = stack.last_mut()?;
        if let Some(&reply) = replies[frame.index].get(frame.next) {
            frame.next += 1;
            if let Some(comment) = slots[reply].take() {
                stack.push(Frame {
                    index: reply,
                    next: 0,
                    thread: CommentThread::from(comment),
                });
            }
            continue;
        }

        let done = stack.pop()?;
        match stack.last_mut() {
            Some(parent) => parent.thread.replies.push(done.thread),
            None => return Some(done.thread),
        }
    }
}

impl From<UserComment> for CommentThread {
    fn from(comment: UserComment) -> Self {
        CommentThread {
            display_content: display_content(&comment),
            comment,
            replies: Vec::new(),
        }
    }
}
