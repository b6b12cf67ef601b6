use postgate_core::{
    ClassificationRequest, Classifier, ClassifierError, ClassifierResult, FailurePolicy,
    GateConfig, NegativeForms, RelevanceGate, Verdict,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// Replies with a fixed string and counts calls.
struct StubClassifier {
    reply: String,
    calls: AtomicUsize,
}

impl StubClassifier {
    fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

impl Classifier for StubClassifier {
    fn classify(&self, _request: &ClassificationRequest) -> ClassifierResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// Answers "нет" only when the text is off the declared topic.
struct TopicOracle;

impl Classifier for TopicOracle {
    fn classify(&self, request: &ClassificationRequest) -> ClassifierResult<String> {
        if request.declared_topic == "Наука" && request.candidate_text.contains("борщ") {
            Ok("нет".to_string())
        } else {
            Ok("Да, текст соответствует теме".to_string())
        }
    }
}

struct FailingClassifier(fn() -> ClassifierError);

impl Classifier for FailingClassifier {
    fn classify(&self, _request: &ClassificationRequest) -> ClassifierResult<String> {
        Err((self.0)())
    }
}

#[test]
fn negative_replies_reject_regardless_of_case_and_period() {
    for reply in ["Нет", "нет.", "НЕТ", "  нет  ", "нет .", "No."] {
        let gate = RelevanceGate::new(StubClassifier::replying(reply));
        assert_eq!(
            gate.evaluate("Сегодня варим борщ", "Наука"),
            Verdict::Reject,
            "reply {reply:?}"
        );
    }
}

#[test]
fn affirmative_reply_accepts() {
    let gate = RelevanceGate::new(StubClassifier::replying("Да, текст соответствует теме"));
    assert_eq!(
        gate.evaluate("Статья о фотосинтезе", "Наука"),
        Verdict::Accept
    );
}

#[test]
fn free_form_negative_sentence_is_not_a_negative_form() {
    let gate = RelevanceGate::new(StubClassifier::replying("Нет, текст про кулинарию"));
    assert_eq!(gate.evaluate("борщ", "Наука"), Verdict::Accept);
}

#[test]
fn cooking_text_under_science_topic_is_rejected() {
    let gate = RelevanceGate::new(TopicOracle);
    assert_eq!(
        gate.evaluate("Рецепт: варим борщ со сметаной", "Наука"),
        Verdict::Reject
    );
    assert_eq!(
        gate.evaluate("Законы Ньютона простыми словами", "Наука"),
        Verdict::Accept
    );
}

#[test]
fn every_classifier_error_fails_open_by_default() {
    let failures: [fn() -> ClassifierError; 5] = [
        || ClassifierError::Network("connection refused".to_string()),
        || ClassifierError::Timeout("15s elapsed".to_string()),
        || ClassifierError::Api {
            status: 503,
            message: "overloaded".to_string(),
        },
        || ClassifierError::Parse("no choices".to_string()),
        || ClassifierError::Config("missing key".to_string()),
    ];
    for failure in failures {
        let gate = RelevanceGate::new(FailingClassifier(failure));
        let outcome = gate.assess("любой текст", "Наука");
        assert_eq!(outcome.verdict, Verdict::Accept);
        assert!(outcome.degraded);
    }
}

#[test]
fn fail_closed_blocks_publication_on_error() {
    let gate = RelevanceGate::with_config(
        FailingClassifier(|| ClassifierError::Network("down".to_string())),
        GateConfig::default().with_policy(FailurePolicy::FailClosed),
    );
    let verdict = gate.evaluate("текст", "Наука");
    assert_eq!(verdict, Verdict::Undetermined);
    assert!(!verdict.permits_publication());
}

#[test]
fn successful_reply_is_not_degraded_even_under_fail_closed() {
    let gate = RelevanceGate::with_config(
        StubClassifier::replying("нет"),
        GateConfig::default().with_policy(FailurePolicy::FailClosed),
    );
    let outcome = gate.assess("текст", "Наука");
    assert_eq!(outcome.verdict, Verdict::Reject);
    assert!(!outcome.degraded);
}

#[test]
fn custom_negative_forms_extend_matching() {
    let forms = NegativeForms::default().with_form("не соответствует");
    let gate = RelevanceGate::with_config(
        StubClassifier::replying("Не соответствует"),
        GateConfig::default().with_negative_forms(forms),
    );
    assert_eq!(gate.evaluate("текст", "Дизайн"), Verdict::Reject);
}

#[test]
fn one_classifier_call_per_evaluation() {
    let classifier = StubClassifier::replying("да");
    let gate = RelevanceGate::new(&classifier);
    gate.evaluate("a", "b");
    gate.evaluate("c", "d");
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn gate_can_be_shared_across_threads() {
    let classifier = Arc::new(StubClassifier::replying("нет."));
    let gate = Arc::new(RelevanceGate::new(Arc::clone(&classifier)));

    let handles: Vec<_> = (0..4)
        .map(|index| {
            let gate = Arc::clone(&gate);
            thread::spawn(move || gate.evaluate(&format!("текст {index}"), "Финансы"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread joins"), Verdict::Reject);
    }
    assert_eq!(classifier.calls.load(Ordering::SeqCst), 4);
}
