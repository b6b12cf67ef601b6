//! Topic-match prompt construction.

use super::{ClassificationRequest, Language};

/// System/user message pair sent as one conversational completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicPrompt {
    pub system: String,
    pub user: String,
}

/// Builds the prompt asking whether the text fits its declared topic.
///
/// The classifier is told to answer with the bare negative token when the
/// text is off-topic and with a short affirmative phrase otherwise, both in
/// the request language.
pub fn build_topic_prompt(request: &ClassificationRequest) -> TopicPrompt {
    let negative = request.language.negative_token();
    match request.language {
        Language::Russian => TopicPrompt {
            system: "Ты модератор блога. Ты проверяешь, соответствует ли текст поста \
                     заявленной автором теме. Отвечай только на русском языке."
                .to_string(),
            user: format!(
                "Тема: «{topic}»\n\nТекст:\n{text}\n\n\
                 Соответствует ли текст теме? Если не соответствует, ответь одним словом \
                 «{negative}». Если соответствует, коротко подтверди это.",
                topic = request.declared_topic.trim(),
                text = request.candidate_text.trim(),
            ),
        },
        Language::English => TopicPrompt {
            system: "You are a blog moderator. You check whether a post's text matches \
                     the topic its author declared. Answer in English only."
                .to_string(),
            user: format!(
                "Topic: \"{topic}\"\n\nText:\n{text}\n\n\
                 Does the text match the topic? If it does not, answer with the single \
                 word \"{negative}\". If it does, confirm briefly.",
                topic = request.declared_topic.trim(),
                text = request.candidate_text.trim(),
            ),
        },
    }
}
