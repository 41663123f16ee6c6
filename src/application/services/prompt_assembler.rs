use crate::application::ports::completion_provider::ChatMessage;
use crate::application::services::retriever::RetrievedChunk;
use crate::domain::entities::Turn;

const SYSTEM_INSTRUCTION: &str = "You are a support assistant answering questions about the user's uploaded documents. \
Answer strictly from the context supplied in the conversation. \
If the context does not contain the answer, say so plainly. \
Never invent facts, citations, or document names.";

const NO_CONTEXT_NOTICE: &str = "No relevant context was found in the indexed documents for this question. \
Tell the user you could not find relevant information in their documents; do not guess or fabricate an answer.";

/// The structured generation request plus the chunks that actually made it
/// into the prompt (after budget truncation), so citations match the prompt
/// exactly.
#[derive(Debug, Clone)]
pub struct AssembledPrompt {
    pub messages: Vec<ChatMessage>,
    pub included: Vec<RetrievedChunk>,
}

/// Merges retrieved chunks, the recent turn window, and the current query
/// into one generation request with a fixed section order.
pub struct PromptAssembler {
    max_context_chars: usize,
}

impl Default for PromptAssembler {
    fn default() -> Self {
        Self {
            max_context_chars: 6000,
        }
    }
}

impl PromptAssembler {
    pub fn new(max_context_chars: usize) -> Self {
        Self { max_context_chars }
    }

    pub fn build(
        &self,
        query: &str,
        retrieved_chunks: &[RetrievedChunk],
        recent_turns: &[Turn],
    ) -> AssembledPrompt {
        let included = self.fit_to_budget(retrieved_chunks);

        let mut messages = Vec::with_capacity(recent_turns.len() * 2 + 2);
        messages.push(ChatMessage::system(SYSTEM_INSTRUCTION));

        for turn in recent_turns {
            messages.push(ChatMessage::user(turn.user_text()));
            messages.push(ChatMessage::assistant(turn.assistant_text()));
        }

        messages.push(ChatMessage::user(self.context_and_query(&included, query)));

        AssembledPrompt { messages, included }
    }

    /// Drops whole lowest-ranked chunks until the rest fit the character
    /// budget; chunk text is never cut mid-way. The top-ranked chunk is
    /// always kept.
    fn fit_to_budget(&self, chunks: &[RetrievedChunk]) -> Vec<RetrievedChunk> {
        let mut included = Vec::new();
        let mut used = 0usize;

        for chunk in chunks {
            let len = chunk.text.chars().count();
            if included.is_empty() || used + len <= self.max_context_chars {
                used += len;
                included.push(chunk.clone());
            } else {
                break;
            }
        }

        included
    }

    fn context_and_query(&self, included: &[RetrievedChunk], query: &str) -> String {
        let mut section = String::new();

        if included.is_empty() {
            section.push_str(NO_CONTEXT_NOTICE);
        } else {
            section.push_str("Context from the uploaded documents:");
            for chunk in included {
                section.push_str(&format!("\n\n[source: {}]\n{}", chunk.filename, chunk.text));
            }
        }

        section.push_str(&format!("\n\nQuestion: {}", query));
        section
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use crate::application::ports::completion_provider::ChatRole;
    use crate::domain::entities::SourceRef;

    fn chunk(text: &str, filename: &str, score: f32) -> RetrievedChunk {
        RetrievedChunk {
            text: text.to_string(),
            score,
            document_id: Uuid::new_v4(),
            filename: filename.to_string(),
            chunk_index: 0,
        }
    }

    #[test]
    fn test_section_order_is_fixed() {
        let assembler = PromptAssembler::default();
        let turns = vec![Turn::new(
            "earlier question".to_string(),
            "earlier answer".to_string(),
            vec![SourceRef::from_chunk("ctx", "a.pdf")],
        )];
        let chunks = vec![chunk("relevant text", "a.pdf", 0.8)];

        let prompt = assembler.build("current question", &chunks, &turns);

        assert_eq!(prompt.messages[0].role, ChatRole::System);
        assert_eq!(prompt.messages[1].role, ChatRole::User);
        assert_eq!(prompt.messages[1].content, "earlier question");
        assert_eq!(prompt.messages[2].role, ChatRole::Assistant);
        assert_eq!(prompt.messages[2].content, "earlier answer");

        let last = prompt.messages.last().unwrap();
        assert_eq!(last.role, ChatRole::User);
        assert!(last.content.contains("[source: a.pdf]"));
        assert!(last.content.contains("relevant text"));
        assert!(last.content.ends_with("Question: current question"));
    }

    #[test]
    fn test_history_is_rendered_oldest_first() {
        let assembler = PromptAssembler::default();
        let turns = vec![
            Turn::new("first".to_string(), "one".to_string(), vec![]),
            Turn::new("second".to_string(), "two".to_string(), vec![]),
        ];

        let prompt = assembler.build("now", &[], &turns);
        assert_eq!(prompt.messages[1].content, "first");
        assert_eq!(prompt.messages[3].content, "second");
    }

    #[test]
    fn test_empty_retrieval_adds_explicit_caveat() {
        let assembler = PromptAssembler::default();
        let prompt = assembler.build("anything indexed?", &[], &[]);

        let last = prompt.messages.last().unwrap();
        assert!(last.content.contains("No relevant context was found"));
        assert!(prompt.included.is_empty());
    }

    #[test]
    fn test_budget_drops_whole_lowest_ranked_chunks() {
        let assembler = PromptAssembler::new(30);
        let chunks = vec![
            chunk("twenty characters aa", "a.pdf", 0.9),
            chunk("this chunk will not fit the budget", "b.pdf", 0.5),
        ];

        let prompt = assembler.build("q", &chunks, &[]);

        assert_eq!(prompt.included.len(), 1);
        assert_eq!(prompt.included[0].filename, "a.pdf");
        let last = prompt.messages.last().unwrap();
        assert!(!last.content.contains("b.pdf"));
        // The surviving chunk is intact, not truncated.
        assert!(last.content.contains("twenty characters aa"));
    }

    #[test]
    fn test_top_chunk_survives_even_when_over_budget() {
        let assembler = PromptAssembler::new(10);
        let chunks = vec![chunk("a chunk much longer than the whole budget", "a.pdf", 0.9)];

        let prompt = assembler.build("q", &chunks, &[]);
        assert_eq!(prompt.included.len(), 1);
    }
}
