use async_trait::async_trait;
use processor::{EngineError, Interpreter, ProcessError, Settings, SpeechEngine};
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Speak(String),
    IsSpeaking,
    Stop,
}

#[derive(Clone, Default)]
struct RecordingEngine {
    calls: Arc<Mutex<Vec<Call>>>,
    speaking: bool,
    fail_speak: bool,
    fail_query: bool,
}

impl RecordingEngine {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn spoken(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Speak(t) => Some(t),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl SpeechEngine for RecordingEngine {
    async fn init(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
    async fn speak(&mut self, text: &str) -> Result<(), EngineError> {
        self.calls.lock().unwrap().push(Call::Speak(text.to_string()));
        if self.fail_speak {
            return Err(EngineError::Speak("busy".into()));
        }
        Ok(())
    }
    async fn is_speaking(&mut self) -> Result<bool, EngineError> {
        self.calls.lock().unwrap().push(Call::IsSpeaking);
        if self.fail_query {
            return Err(EngineError::Query("gone".into()));
        }
        Ok(self.speaking)
    }
    async fn stop(&mut self) -> Result<(), EngineError> {
        self.calls.lock().unwrap().push(Call::Stop);
        self.speaking = false;
        Ok(())
    }
    async fn shutdown(&mut self) {}
}

fn interpreter(engine: &RecordingEngine) -> Interpreter {
    Interpreter::new(Settings::default(), Box::new(engine.clone()))
}

#[tokio::test]
async fn queued_fragments_are_joined_on_dispatch() {
    let engine = RecordingEngine::default();
    let mut interp = interpreter(&engine);

    interp.process_line("q hello").await.unwrap();
    interp.process_line("c  there").await.unwrap();
    interp.process_line("q {world!}").await.unwrap();
    assert!(engine.calls().is_empty());
    assert_eq!(interp.queue().len(), 3);

    interp.process_line("d").await.unwrap();
    assert_eq!(engine.spoken(), vec!["hello thereworld".to_string()]);
    assert!(interp.queue().is_empty());
}

#[tokio::test]
async fn dispatch_with_empty_queue_is_silent() {
    let engine = RecordingEngine::default();
    let mut interp = interpreter(&engine);
    interp.process_line("d").await.unwrap();
    interp.process_line("q a").await.unwrap();
    interp.process_line("d").await.unwrap();
    interp.process_line("d").await.unwrap();
    assert_eq!(engine.spoken(), vec!["a".to_string()]);
}

#[tokio::test]
async fn say_strips_embedded_commands() {
    let engine = RecordingEngine::default();
    let mut interp = interpreter(&engine);
    interp.process_line("tts_say {a[{x}]bc}").await.unwrap();
    interp.process_line("tts_say one [[rate 9]]two").await.unwrap();
    assert_eq!(
        engine.spoken(),
        vec!["[[rate 275]]ab".to_string(), "[[rate 275]]one [[rate 9]]two".to_string()]
    );
}

#[tokio::test]
async fn brace_unwrap_runs_before_stripping() {
    let engine = RecordingEngine::default();
    let mut interp = interpreter(&engine);
    interp.process_line("tts_say hello [{evil}] world").await.unwrap();
    assert_eq!(engine.spoken(), vec!["[[rate 275]]evi".to_string()]);
}

#[tokio::test]
async fn embedded_commands_survive_queueing() {
    let engine = RecordingEngine::default();
    let mut interp = interpreter(&engine);
    interp.process_line("q {a[{x}]bc}").await.unwrap();
    interp.process_line("c {[{y}]zz}").await.unwrap();
    assert_eq!(interp.queue(), ["a[{x}]b".to_string(), "[{y}]z".to_string()]);
    interp.process_line("d").await.unwrap();
    assert_eq!(engine.spoken(), vec!["abz".to_string()]);
}

#[tokio::test]
async fn uppercase_letter_is_pitched() {
    let engine = RecordingEngine::default();
    let mut interp = interpreter(&engine);
    interp.process_line("l Q").await.unwrap();
    assert_eq!(
        engine.spoken(),
        vec!["[[rate 550]][[char ltr]][[pbas +0.800000]]Q[[pbas -0.800000]][[char norm]]".to_string()]
    );
}

#[tokio::test]
async fn lowercase_letter_is_not_pitched() {
    let engine = RecordingEngine::default();
    let mut interp = interpreter(&engine);
    interp.process_line("l q").await.unwrap();
    assert_eq!(
        engine.spoken(),
        vec!["[[rate 550]][[char ltr]]q[[char norm]]".to_string()]
    );
}

#[tokio::test]
async fn uppercase_symbols_are_not_pitched() {
    let engine = RecordingEngine::default();
    let mut interp = interpreter(&engine);
    interp.process_line("l Ⓐ").await.unwrap();
    interp.process_line("l Ⅷ").await.unwrap();
    interp.process_line("l 7").await.unwrap();
    assert_eq!(
        engine.spoken(),
        vec![
            "[[rate 550]][[char ltr]]Ⓐ[[char norm]]".to_string(),
            "[[rate 550]][[char ltr]]Ⅷ[[char norm]]".to_string(),
            "[[rate 550]][[char ltr]]7[[char norm]]".to_string(),
        ]
    );
}

#[tokio::test]
async fn letter_leaves_queue_alone() {
    let engine = RecordingEngine::default();
    let mut interp = interpreter(&engine);
    interp.process_line("q pending").await.unwrap();
    interp.process_line("l x").await.unwrap();
    interp.process_line("tts_say now").await.unwrap();
    assert_eq!(interp.queue(), ["pending".to_string()]);
}

#[tokio::test]
async fn custom_settings_are_used() {
    let engine = RecordingEngine::default();
    let settings = Settings {
        say_rate: 600,
        speech_rate: 300,
        uppercase_pitch: 1.5,
    };
    let mut interp = Interpreter::new(settings, Box::new(engine.clone()));
    interp.process_line("l É").await.unwrap();
    interp.process_line("tts_say ok").await.unwrap();
    assert_eq!(
        engine.spoken(),
        vec![
            "[[rate 600]][[char ltr]][[pbas +1.500000]]É[[pbas -1.500000]][[char norm]]".to_string(),
            "[[rate 300]]ok".to_string(),
        ]
    );
}

#[tokio::test]
async fn version_message_is_literal() {
    let engine = RecordingEngine::default();
    let mut interp = interpreter(&engine);
    interp.process_line("version").await.unwrap();
    assert_eq!(engine.spoken(), vec!["[[rate 275]]Version is $s".to_string()]);
}

#[tokio::test]
async fn stop_when_silent_only_queries() {
    let engine = RecordingEngine::default();
    let mut interp = interpreter(&engine);
    interp.process_line("s").await.unwrap();
    assert_eq!(engine.calls(), vec![Call::IsSpeaking]);
    assert!(interp.queue().is_empty());
}

#[tokio::test]
async fn stop_clears_queue_and_halts_speech() {
    let engine = RecordingEngine {
        speaking: true,
        ..Default::default()
    };
    let mut interp = interpreter(&engine);
    interp.process_line("q one").await.unwrap();
    interp.process_line("s").await.unwrap();
    assert!(interp.queue().is_empty());
    assert_eq!(engine.calls(), vec![Call::IsSpeaking, Call::Stop]);

    interp.process_line("d").await.unwrap();
    assert!(engine.spoken().is_empty());
}

#[tokio::test]
async fn failed_query_still_clears_queue() {
    let engine = RecordingEngine {
        speaking: true,
        fail_query: true,
        ..Default::default()
    };
    let mut interp = interpreter(&engine);
    interp.process_line("q one").await.unwrap();
    interp.process_line("s").await.unwrap();
    assert!(interp.queue().is_empty());
    assert_eq!(engine.calls(), vec![Call::IsSpeaking]);
}

#[tokio::test]
async fn speak_failure_is_reported_once() {
    let engine = RecordingEngine {
        fail_speak: true,
        ..Default::default()
    };
    let mut interp = interpreter(&engine);
    interp.process_line("q one").await.unwrap();
    let err = interp.process_line("d").await.unwrap_err();
    assert!(matches!(err, ProcessError::Engine(EngineError::Speak(_))));
    assert_eq!(engine.spoken().len(), 1);
    assert!(interp.queue().is_empty());
}

#[tokio::test]
async fn unknown_command_changes_nothing() {
    let engine = RecordingEngine::default();
    let mut interp = interpreter(&engine);
    interp.process_line("q kept").await.unwrap();
    let err = interp.process_line("zz foo").await.unwrap_err();
    assert!(matches!(err, ProcessError::UnknownCommand(ref t) if t == "zz"));
    assert_eq!(err.to_string(), "unknown command: zz");
    assert_eq!(interp.queue(), ["kept".to_string()]);
    assert!(engine.calls().is_empty());
}

#[tokio::test]
async fn malformed_arguments_never_fail() {
    let engine = RecordingEngine::default();
    let mut interp = interpreter(&engine);
    for line in ["l", "l }{", "tts_say {}", "q }x{", "l {é}", "tts_say [{", "c {[*]}"] {
        interp.process_line(line).await.unwrap();
    }
    interp.process_line("d").await.unwrap();
}

#[tokio::test]
async fn pause_tokens_reach_the_engine() {
    let engine = RecordingEngine::default();
    let mut interp = interpreter(&engine);
    interp.process_line("tts_say a[*]b").await.unwrap();
    assert_eq!(engine.spoken(), vec!["[[rate 275]]a[[slnc 50]]b".to_string()]);
}
