//! The run loop.
//!
//! The step executor is deliberately timer-free; the [`Runner`] owns the
//! wall-clock deadline, the iteration counter, and the cancellation token,
//! and drives `step()` until one of them fires or the planner finishes.
//! Limit checks happen between steps only. A tool call in flight is never
//! interrupted from here.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use stride_core::action::AgentFinish;
use stride_core::events::{BaseEvent, RunEvent};
use stride_core::transcript::Transcript;
use stride_tools::ToolContext;

use crate::errors::{RuntimeError, StopReason};
use crate::planner::StepInputs;
use crate::step::executor::{StepExecutor, StepOutcome};

/// Limits for one run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunnerConfig {
    /// Maximum number of steps before the run is stopped.
    pub max_iterations: u32,
    /// Optional wall-clock budget for the whole run.
    pub max_duration: Option<Duration>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            max_duration: None,
        }
    }
}

/// What a finished (or stopped) run produced.
#[derive(Clone, Debug, PartialEq)]
pub struct RunResult {
    /// The run's identifier (also on every emitted event).
    pub run_id: String,
    /// The final answer, present only when `stop_reason` is `Finished`.
    pub output: Option<AgentFinish>,
    /// The full step history.
    pub transcript: Transcript,
    /// Why the run ended.
    pub stop_reason: StopReason,
    /// Steps executed.
    pub iterations: u32,
}

/// Drives a [`StepExecutor`] to completion under configured limits.
pub struct Runner {
    config: RunnerConfig,
    cancel: CancellationToken,
}

impl Runner {
    /// Create a runner with the given limits.
    #[must_use]
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// A handle that cancels this runner's runs when fired.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the executor until it finishes or a limit fires.
    ///
    /// Limit order per iteration: cancellation, deadline, iteration count;
    /// checked before each step, never mid-step.
    #[instrument(skip_all)]
    pub async fn run(
        &self,
        executor: &mut StepExecutor,
        inputs: &StepInputs,
    ) -> Result<RunResult, RuntimeError> {
        let run_id = Uuid::now_v7().to_string();
        let ctx = ToolContext {
            run_id: run_id.clone(),
            cancellation: self.cancel.clone(),
        };
        let deadline = self
            .config
            .max_duration
            .map(|d| tokio::time::Instant::now() + d);

        info!(%run_id, max_iterations = self.config.max_iterations, "run started");
        let _ = executor.emitter().emit(RunEvent::RunStarted {
            base: BaseEvent::now(&run_id),
        });

        let mut transcript = Transcript::new();
        let mut iterations = 0;

        let stop_reason = loop {
            if self.cancel.is_cancelled() {
                break StopReason::Cancelled;
            }
            if let Some(deadline) = deadline {
                if tokio::time::Instant::now() >= deadline {
                    break StopReason::DeadlineExceeded;
                }
            }
            if iterations >= self.config.max_iterations {
                break StopReason::MaxIterations;
            }

            iterations += 1;
            let _ = executor.emitter().emit(RunEvent::StepStarted {
                base: BaseEvent::now(&run_id),
                iteration: iterations,
            });

            match executor.step(&mut transcript, inputs, &ctx).await? {
                StepOutcome::Finished(finish) => {
                    info!(%run_id, iterations, "run finished");
                    let _ = executor.emitter().emit(RunEvent::RunCompleted {
                        base: BaseEvent::now(&run_id),
                        stop_reason: StopReason::Finished.as_str().to_owned(),
                        iterations,
                    });
                    return Ok(RunResult {
                        run_id,
                        output: Some(finish),
                        transcript,
                        stop_reason: StopReason::Finished,
                        iterations,
                    });
                }
                StepOutcome::Continue(_) => {}
            }
        };

        warn!(%run_id, ?stop_reason, iterations, "run stopped before a final answer");
        let _ = executor.emitter().emit(RunEvent::RunCompleted {
            base: BaseEvent::now(&run_id),
            stop_reason: stop_reason.as_str().to_owned(),
            iterations,
        });
        Ok(RunResult {
            run_id,
            output: None,
            transcript,
            stop_reason,
            iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::EventEmitter;
    use crate::planner::{Plan, PlanError, Planner};
    use crate::step::executor::ExecutorOpts;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use stride_core::action::AgentAction;
    use stride_core::transcript::Step;
    use stride_llm::{ModelConfig, ModelPair, Tokenizer, TranscriptTracker};
    use stride_tools::{Tool, ToolError, ToolRegistry};

    struct WordTokenizer;

    impl Tokenizer for WordTokenizer {
        fn count_tokens(&self, text: &str) -> u64 {
            text.split_whitespace().count() as u64
        }
    }

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        async fn run(
            &self,
            input: &Value,
            _ctx: &stride_tools::ToolContext,
        ) -> Result<String, ToolError> {
            Ok(stride_core::action::render_input(input))
        }
    }

    /// Acts for `acting_steps` steps, then finishes.
    struct CountdownPlanner {
        acting_steps: u32,
        seen: std::sync::atomic::AtomicU32,
    }

    #[async_trait]
    impl Planner for CountdownPlanner {
        async fn plan(
            &self,
            _transcript: &[Step],
            _inputs: &StepInputs,
            _model: &ModelConfig,
        ) -> Result<Plan, PlanError> {
            let n = self.seen.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if n < self.acting_steps {
                Ok(Plan::Act(vec![AgentAction::new("echo", json!("ping"), "")]))
            } else {
                Ok(Plan::Finish(AgentFinish::new("all done", "")))
            }
        }
    }

    /// Never finishes.
    struct ForeverPlanner;

    #[async_trait]
    impl Planner for ForeverPlanner {
        async fn plan(
            &self,
            _transcript: &[Step],
            _inputs: &StepInputs,
            _model: &ModelConfig,
        ) -> Result<Plan, PlanError> {
            Ok(Plan::Act(vec![AgentAction::new("echo", json!("again"), "")]))
        }
    }

    fn executor(planner: Box<dyn Planner>) -> StepExecutor {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));
        let tracker = TranscriptTracker::new(Arc::new(WordTokenizer), "base");
        StepExecutor::new(
            planner,
            Arc::new(registry),
            tracker,
            ModelPair {
                short_context: ModelConfig::new("S", 8_192),
                long_context: ModelConfig::new("L", 128_000),
                switch_threshold: 1_000_000,
            },
            ExecutorOpts::default(),
            Arc::new(EventEmitter::new()),
        )
    }

    #[tokio::test]
    async fn finishes_with_answer() {
        let mut executor = executor(Box::new(CountdownPlanner {
            acting_steps: 2,
            seen: std::sync::atomic::AtomicU32::new(0),
        }));
        let runner = Runner::new(RunnerConfig::default());

        let result = runner.run(&mut executor, &StepInputs::new()).await.unwrap();
        assert_eq!(result.stop_reason, StopReason::Finished);
        assert_eq!(result.output.unwrap().output, "all done");
        assert_eq!(result.iterations, 3);
        assert_eq!(result.transcript.len(), 2);
    }

    #[tokio::test]
    async fn stops_at_iteration_limit() {
        let mut executor = executor(Box::new(ForeverPlanner));
        let runner = Runner::new(RunnerConfig {
            max_iterations: 4,
            max_duration: None,
        });

        let result = runner.run(&mut executor, &StepInputs::new()).await.unwrap();
        assert_eq!(result.stop_reason, StopReason::MaxIterations);
        assert!(result.output.is_none());
        assert_eq!(result.iterations, 4);
        assert_eq!(result.transcript.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn stops_at_deadline() {
        /// Planner that sleeps so virtual time can pass between steps.
        struct SlowPlanner;

        #[async_trait]
        impl Planner for SlowPlanner {
            async fn plan(
                &self,
                _transcript: &[Step],
                _inputs: &StepInputs,
                _model: &ModelConfig,
            ) -> Result<Plan, PlanError> {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Ok(Plan::Act(vec![AgentAction::new("echo", json!("slow"), "")]))
            }
        }

        let mut executor = executor(Box::new(SlowPlanner));
        let runner = Runner::new(RunnerConfig {
            max_iterations: 100,
            max_duration: Some(Duration::from_secs(3)),
        });

        let result = runner.run(&mut executor, &StepInputs::new()).await.unwrap();
        assert_eq!(result.stop_reason, StopReason::DeadlineExceeded);
        assert!(result.output.is_none());
        // Two 2s steps pass the 3s deadline before the third check.
        assert_eq!(result.iterations, 2);
    }

    #[tokio::test]
    async fn pre_cancelled_runs_zero_steps() {
        let mut executor = executor(Box::new(ForeverPlanner));
        let runner = Runner::new(RunnerConfig::default());
        runner.cancellation_token().cancel();

        let result = runner.run(&mut executor, &StepInputs::new()).await.unwrap();
        assert_eq!(result.stop_reason, StopReason::Cancelled);
        assert_eq!(result.iterations, 0);
        assert!(result.transcript.is_empty());
    }

    #[tokio::test]
    async fn emits_run_lifecycle_events() {
        let mut executor = executor(Box::new(CountdownPlanner {
            acting_steps: 1,
            seen: std::sync::atomic::AtomicU32::new(0),
        }));
        let mut rx = executor.emitter().subscribe();
        let runner = Runner::new(RunnerConfig::default());

        let result = runner.run(&mut executor, &StepInputs::new()).await.unwrap();

        let mut types = Vec::new();
        while let Ok(event) = rx.try_recv() {
            assert_eq!(event.run_id(), result.run_id);
            types.push(event.event_type());
        }
        assert_eq!(types.first(), Some(&"run_started"));
        assert_eq!(types.last(), Some(&"run_completed"));
        assert!(types.contains(&"step_started"));
        assert!(types.contains(&"tool_execution_start"));
        assert!(types.contains(&"tool_execution_end"));
    }

    #[test]
    fn config_defaults() {
        let config = RunnerConfig::default();
        assert_eq!(config.max_iterations, 15);
        assert!(config.max_duration.is_none());
    }

    #[test]
    fn config_serde_roundtrip() {
        let config = RunnerConfig {
            max_iterations: 7,
            max_duration: Some(Duration::from_secs(30)),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["maxIterations"], 7);
        let back: RunnerConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back.max_iterations, 7);
        assert_eq!(back.max_duration, Some(Duration::from_secs(30)));
    }
}
