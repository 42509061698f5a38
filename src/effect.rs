use std::time::Duration;

use crate::error::Result;
use crate::menu::CREATING_TEXT;
use crate::transport::{ChatId, ChatTransport};

pub const EFFECT_SIZE: usize = 6;

const FILLED: &str = "🟨";
const EMPTY: &str = "⬜";

/// Frame `step` (1-based) is `step` identical rows, each a bar with `step` filled cells.
pub fn frame(step: usize, size: usize) -> String {
    let row = format!("[{}{}]", FILLED.repeat(step), EMPTY.repeat(size.saturating_sub(step)));
    vec![row; step].join("\n")
}

pub fn frames(size: usize) -> Vec<String> {
    (1..=size).map(|step| frame(step, size)).collect()
}

/// Posts a placeholder and animates it frame by frame, sleeping `delay` after each edit.
/// Dropping the returned future stops the animation at the next await point.
pub async fn play_creation_effect<T>(transport: &T, chat: ChatId, delay: Duration) -> Result<()>
where
    T: ChatTransport + ?Sized,
{
    let message = transport.send_text(chat, CREATING_TEXT, None).await?;

    for body in frames(EFFECT_SIZE) {
        transport.edit_text(message, &body, None).await?;
        tokio::time::sleep(delay).await;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_and_last_frame() {
        assert_eq!(frame(1, 6), "[🟨⬜⬜⬜⬜⬜]");
        let last = frame(6, 6);
        assert_eq!(last.lines().count(), 6);
        assert!(last.lines().all(|l| l == "[🟨🟨🟨🟨🟨🟨]"));
    }

    #[test]
    fn test_frames_are_distinct_and_growing() {
        let all = frames(EFFECT_SIZE);
        assert_eq!(all.len(), 6);
        for (i, body) in all.iter().enumerate() {
            assert_eq!(body.lines().count(), i + 1);
        }
    }
}
