//! Catalog - すべての lesson を名前付きで登録する
//!
//! 同期の lesson は `FnLesson`（関数ポインタ）でまとめ、
//! task/channel を使う lesson はそれぞれ専用の型にしています。

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TourError;
use crate::lessons::{
    animals, basics, buffered, counter, errors,
    fan_in::{self, FanInStrategy},
    handoff::{self, ReceiveMode},
    pointers,
};
use crate::ports::Output;
use crate::runtime::{Lesson, LessonContext, LessonRegistry};

/// Lesson run when no name is given.
pub const DEFAULT_LESSON: &str = "var-init";

type SyncRun = fn(&dyn Output) -> Result<(), TourError>;

/// A lesson that only writes to the output.
struct FnLesson {
    name: &'static str,
    summary: &'static str,
    run: SyncRun,
}

#[async_trait]
impl Lesson for FnLesson {
    fn name(&self) -> &'static str {
        self.name
    }

    fn summary(&self) -> &'static str {
        self.summary
    }

    async fn run(&self, ctx: &LessonContext) -> Result<(), TourError> {
        (self.run)(ctx.out.as_ref())
    }
}

struct CounterLesson {
    concurrent: bool,
}

#[async_trait]
impl Lesson for CounterLesson {
    fn name(&self) -> &'static str {
        if self.concurrent {
            "spawn-counters-concurrent"
        } else {
            "spawn-counters"
        }
    }

    fn summary(&self) -> &'static str {
        if self.concurrent {
            "two endless counters as concurrent tasks"
        } else {
            "two endless counters called in order; the second never runs"
        }
    }

    async fn run(&self, ctx: &LessonContext) -> Result<(), TourError> {
        let interval = ctx.config.counter_interval();
        if self.concurrent {
            counter::count_concurrent(interval, Arc::clone(&ctx.out)).await;
        } else {
            counter::count_sequential(interval, ctx.out.as_ref()).await;
        }
        Ok(())
    }
}

struct HandoffLesson {
    mode: ReceiveMode,
}

#[async_trait]
impl Lesson for HandoffLesson {
    fn name(&self) -> &'static str {
        match self.mode {
            ReceiveMode::Once => "handoff",
            ReceiveMode::Forever => "handoff-forever",
            ReceiveMode::UntilClosed => "handoff-until-closed",
        }
    }

    fn summary(&self) -> &'static str {
        match self.mode {
            ReceiveMode::Once => "rendezvous channel, consumer reads one message",
            ReceiveMode::Forever => "consumer reads past the last message and deadlocks",
            ReceiveMode::UntilClosed => "producer closes the channel, consumer reads all",
        }
    }

    async fn run(&self, ctx: &LessonContext) -> Result<(), TourError> {
        handoff::handoff(self.mode, &ctx.config, ctx.out.as_ref()).await?;
        Ok(())
    }
}

struct BufferedLesson {
    buffered: bool,
}

#[async_trait]
impl Lesson for BufferedLesson {
    fn name(&self) -> &'static str {
        if self.buffered {
            "buffered-send"
        } else {
            "unbuffered-send"
        }
    }

    fn summary(&self) -> &'static str {
        if self.buffered {
            "send then receive on one task with a buffer"
        } else {
            "send then receive on one task without a buffer (deadlock)"
        }
    }

    async fn run(&self, ctx: &LessonContext) -> Result<(), TourError> {
        let capacity = if self.buffered {
            ctx.config.buffer_capacity
        } else {
            0
        };
        buffered::buffered_lesson(capacity, ctx.config.stall_timeout(), ctx.out.as_ref()).await
    }
}

struct FanInLesson {
    strategy: FanInStrategy,
}

#[async_trait]
impl Lesson for FanInLesson {
    fn name(&self) -> &'static str {
        match self.strategy {
            FanInStrategy::RoundRobin => "fan-in",
            FanInStrategy::Select => "fan-in-select",
        }
    }

    fn summary(&self) -> &'static str {
        match self.strategy {
            FanInStrategy::RoundRobin => "fixed-order reads throttle the fast producer",
            FanInStrategy::Select => "select reads whichever producer is ready",
        }
    }

    async fn run(&self, ctx: &LessonContext) -> Result<(), TourError> {
        fan_in::fan_in(self.strategy, &ctx.config, ctx.out.as_ref(), None).await?;
        Ok(())
    }
}

fn sync_lessons() -> Vec<FnLesson> {
    fn lesson(name: &'static str, summary: &'static str, run: SyncRun) -> FnLesson {
        FnLesson { name, summary, run }
    }

    vec![
        lesson("var-init", "zero value, explicit and inferred bindings", |out| {
            basics::var_init(out);
            Ok(())
        }),
        lesson("condition", "if / else if / else", |out| {
            basics::condition(out);
            Ok(())
        }),
        lesson("array", "fixed-size array mutated by index", |out| {
            basics::array(out);
            Ok(())
        }),
        lesson("slices", "growable Vec mutated by index", |out| {
            basics::slices(out);
            Ok(())
        }),
        lesson("map", "insert and remove map entries", |out| {
            basics::map(out);
            Ok(())
        }),
        lesson("for-loop", "counting loop", |out| {
            basics::for_loop(out);
            Ok(())
        }),
        lesson("while-loop", "conditional loop", |out| {
            basics::while_loop(out);
            Ok(())
        }),
        lesson("range-slice", "iterate a slice with indices", |out| {
            basics::range_slice(out);
            Ok(())
        }),
        lesson("range-map", "iterate a map (unordered)", |out| {
            basics::range_map(out);
            Ok(())
        }),
        lesson("sum", "a two-argument function", |out| {
            out.show(&basics::sum(2, 3));
            Ok(())
        }),
        lesson("sqrt", "square root returning a generic error", |out| {
            errors::sqrt_lesson(out);
            Ok(())
        }),
        lesson("pointer", "value, address, dereference", |out| {
            pointers::pointer(out);
            Ok(())
        }),
        lesson("advanced-pointer", "mutation by value vs by reference", |out| {
            pointers::advanced_pointer(out);
            Ok(())
        }),
        lesson("struct", "a two-field record", |out| {
            pointers::person(out);
            Ok(())
        }),
        lesson("struct-method", "by-value vs by-reference methods", |out| {
            pointers::person_methods(out);
            Ok(())
        }),
        lesson("interface", "dynamic dispatch over two animals", animals::interface),
        lesson("interface-values", "type and value held by a slot", |out| {
            animals::interface_values(out);
            Ok(())
        }),
        lesson(
            "interface-underlying-nil",
            "slot holding an absent animal still dispatches",
            animals::interface_with_underlying_nil,
        ),
        lesson(
            "interface-nil",
            "empty slot fails to dispatch",
            animals::interface_with_nil,
        ),
        lesson("empty-interface", "describe values of any type", |out| {
            animals::empty_interface(out);
            Ok(())
        }),
        lesson("error", "custom error type", |out| {
            errors::error_lesson(out);
            Ok(())
        }),
    ]
}

/// Registry with every lesson.
pub fn default_registry() -> Result<LessonRegistry, TourError> {
    let mut reg = LessonRegistry::new();

    for l in sync_lessons() {
        reg.register(Arc::new(l))?;
    }
    for concurrent in [false, true] {
        reg.register(Arc::new(CounterLesson { concurrent }))?;
    }
    for mode in [ReceiveMode::Once, ReceiveMode::Forever, ReceiveMode::UntilClosed] {
        reg.register(Arc::new(HandoffLesson { mode }))?;
    }
    for buffered in [false, true] {
        reg.register(Arc::new(BufferedLesson { buffered }))?;
    }
    for strategy in [FanInStrategy::RoundRobin, FanInStrategy::Select] {
        reg.register(Arc::new(FanInLesson { strategy }))?;
    }

    Ok(reg)
}
