use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::Instrument;

use crate::config::TourConfig;
use crate::error::TourError;
use crate::ports::Output;

/// Everything a lesson may use while it runs.
#[derive(Clone)]
pub struct LessonContext {
    pub out: Arc<dyn Output>,
    pub config: Arc<TourConfig>,
}

impl LessonContext {
    pub fn new(out: Arc<dyn Output>, config: TourConfig) -> Self {
        Self {
            out,
            config: Arc::new(config),
        }
    }
}

/// A runnable lesson.
#[async_trait]
pub trait Lesson: Send + Sync {
    /// Stable kebab-case name used on the command line.
    fn name(&self) -> &'static str;

    fn summary(&self) -> &'static str;

    async fn run(&self, ctx: &LessonContext) -> Result<(), TourError>;
}

/// Serializable listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonInfo {
    pub name: &'static str,
    pub summary: &'static str,
}

/// Registry of lessons (name -> lesson).
///
/// Design:
/// - Built during initialization (mutable).
/// - Used during runtime (immutable).
#[derive(Default)]
pub struct LessonRegistry {
    lessons: HashMap<&'static str, Arc<dyn Lesson>>,
}

impl LessonRegistry {
    pub fn new() -> Self {
        Self {
            lessons: HashMap::new(),
        }
    }

    /// Register a lesson under its own name. Names must be unique.
    pub fn register(&mut self, lesson: Arc<dyn Lesson>) -> Result<(), TourError> {
        let name = lesson.name();
        if self.lessons.contains_key(name) {
            return Err(TourError::DuplicateLesson(name.to_string()));
        }
        self.lessons.insert(name, lesson);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Lesson>> {
        self.lessons.get(name)
    }

    /// All lessons, sorted by name.
    pub fn infos(&self) -> Vec<LessonInfo> {
        let mut infos: Vec<LessonInfo> = self
            .lessons
            .values()
            .map(|l| LessonInfo {
                name: l.name(),
                summary: l.summary(),
            })
            .collect();
        infos.sort_by_key(|i| i.name);
        infos
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }
}

/// Runtime runs one lesson by name.
pub struct Runtime {
    registry: Arc<LessonRegistry>,
}

impl Runtime {
    pub fn new(registry: Arc<LessonRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &LessonRegistry {
        &self.registry
    }

    /// Run the named lesson.
    ///
    /// With `run_for` set, a lesson still running at the deadline is stopped and
    /// counts as finished; tasks it spawned through a `ProducerGroup` are aborted.
    pub async fn run(&self, name: &str, ctx: &LessonContext) -> Result<(), TourError> {
        let lesson = self
            .registry
            .get(name)
            .ok_or_else(|| TourError::LessonNotFound(name.to_string()))?;

        let span = tracing::info_span!("lesson", name = lesson.name());
        async {
            tracing::debug!("start");
            match ctx.config.run_for() {
                None => lesson.run(ctx).await,
                Some(limit) => match tokio::time::timeout(limit, lesson.run(ctx)).await {
                    Ok(res) => res,
                    Err(_) => {
                        tracing::info!(?limit, "run_for elapsed, stopping lesson");
                        Ok(())
                    }
                },
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::MemoryOutput;

    struct Hello;

    #[async_trait]
    impl Lesson for Hello {
        fn name(&self) -> &'static str {
            "hello"
        }

        fn summary(&self) -> &'static str {
            "says hello"
        }

        async fn run(&self, ctx: &LessonContext) -> Result<(), TourError> {
            ctx.out.line("hello");
            Ok(())
        }
    }

    struct Endless;

    #[async_trait]
    impl Lesson for Endless {
        fn name(&self) -> &'static str {
            "endless"
        }

        fn summary(&self) -> &'static str {
            "never returns"
        }

        async fn run(&self, ctx: &LessonContext) -> Result<(), TourError> {
            loop {
                ctx.out.line("tick");
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            }
        }
    }

    fn runtime() -> Runtime {
        let mut reg = LessonRegistry::new();
        reg.register(Arc::new(Hello)).unwrap();
        reg.register(Arc::new(Endless)).unwrap();
        Runtime::new(Arc::new(reg))
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut reg = LessonRegistry::new();
        reg.register(Arc::new(Hello)).unwrap();
        let err = reg.register(Arc::new(Hello)).unwrap_err();
        assert!(matches!(err, TourError::DuplicateLesson(n) if n == "hello"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn infos_are_sorted() {
        let rt = runtime();
        let names: Vec<_> = rt.registry().infos().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["endless", "hello"]);
    }

    #[tokio::test]
    async fn runtime_runs_registered_lesson() {
        let out = Arc::new(MemoryOutput::new());
        let ctx = LessonContext::new(out.clone(), TourConfig::default());
        runtime().run("hello", &ctx).await.unwrap();
        assert_eq!(out.lines(), vec!["hello"]);
    }

    #[tokio::test]
    async fn runtime_errors_when_lesson_missing() {
        let ctx = LessonContext::new(Arc::new(MemoryOutput::new()), TourConfig::default());
        let err = runtime().run("missing", &ctx).await.unwrap_err();
        assert_eq!(err.to_string(), "lesson not found: missing");
    }

    #[tokio::test(start_paused = true)]
    async fn run_for_bounds_endless_lesson() {
        let out = Arc::new(MemoryOutput::new());
        let cfg = TourConfig {
            run_for_ms: Some(350),
            ..TourConfig::default()
        };
        let ctx = LessonContext::new(out.clone(), cfg);
        runtime().run("endless", &ctx).await.unwrap();
        assert_eq!(out.count("tick"), 4);
    }
}
