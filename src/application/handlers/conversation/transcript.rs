//! Transcript assembly for the AI provider.

use crate::domain::conversation::{Message, Sender};
use crate::ports::{TranscriptEntry, TranscriptRole};

/// Maps a stored sender onto the provider's role vocabulary.
pub fn transcript_role(sender: Sender) -> TranscriptRole {
    match sender {
        Sender::Assistant => TranscriptRole::Model,
        Sender::User => TranscriptRole::User,
    }
}

/// Builds the provider transcript: the persona instruction followed by every
/// stored message in order.
pub fn build_transcript(instruction: &str, messages: &[Message]) -> Vec<TranscriptEntry> {
    let mut transcript = Vec::with_capacity(messages.len() + 1);
    transcript.push(TranscriptEntry::instruction(instruction));
    transcript.extend(
        messages
            .iter()
            .map(|m| TranscriptEntry::new(transcript_role(m.sender), m.content.clone())),
    );
    transcript
}
