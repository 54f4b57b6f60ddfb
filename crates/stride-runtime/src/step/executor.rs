//! The step state machine.
//!
//! One call to [`StepExecutor::step`] is one full `plan → act → record`
//! cycle:
//!
//! 1. Bring token accounting up to date with the transcript-so-far.
//! 2. Promote the model slot if the running count crossed the threshold.
//! 3. Apply the trim policy and ask the planner for its next move.
//! 4. A final answer ends the run; actions execute in emitted order, each
//!    appending an (action, observation) pair; malformed output goes
//!    through the configured recovery policy.
//!
//! Unknown tools and failing tools become observations, never errors: the
//! model sees its own mistakes on the next planning call. The only fatal
//! paths out are a planner failure that is not a parse failure, a parse
//! failure under the hard-fail policy, and a token accounting violation.

use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use stride_core::action::AgentAction;
use stride_core::events::{BaseEvent, RunEvent};
use stride_core::text::log_preview;
use stride_core::transcript::{Step, Transcript};
use stride_llm::{ModelConfig, ModelPair, ModelSlot, ModelTier, TranscriptTracker};
use stride_tools::{PassthroughTool, Tool, ToolContext, ToolRegistry, invalid_tool_observation};

use crate::emitter::EventEmitter;
use crate::errors::RuntimeError;
use crate::planner::{Plan, PlanError, Planner, StepInputs};
use crate::step::recovery::ParseRecovery;
use crate::step::trim::TrimPolicy;

/// Max observation bytes echoed into structured logs.
const OBSERVATION_PREVIEW_BYTES: usize = 200;

/// Behavior knobs for the executor.
#[derive(Debug, Default)]
pub struct ExecutorOpts {
    /// What to do with malformed planner output.
    pub recovery: ParseRecovery,
    /// Transcript preparation before each planning call.
    pub trim: TrimPolicy,
}

/// The result of one step.
#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    /// Terminal: the planner produced a final answer.
    Finished(stride_core::action::AgentFinish),
    /// Non-terminal: these pairs were appended; the caller loops again.
    Continue(Vec<Step>),
}

/// Drives one run's planning and tool dispatch.
///
/// Owns the run's tracker and model slot exclusively; a new executor is
/// built per run and never shared across runs.
pub struct StepExecutor {
    planner: Box<dyn Planner>,
    tools: Arc<ToolRegistry>,
    tracker: TranscriptTracker,
    model: ModelSlot,
    opts: ExecutorOpts,
    emitter: Arc<EventEmitter>,
}

impl StepExecutor {
    /// Create an executor for one run.
    pub fn new(
        planner: Box<dyn Planner>,
        tools: Arc<ToolRegistry>,
        tracker: TranscriptTracker,
        models: ModelPair,
        opts: ExecutorOpts,
        emitter: Arc<EventEmitter>,
    ) -> Self {
        Self {
            planner,
            tools,
            tracker,
            model: ModelSlot::new(models),
            opts,
            emitter,
        }
    }

    /// The currently active model tier.
    #[must_use]
    pub fn model_tier(&self) -> ModelTier {
        self.model.tier()
    }

    /// The currently active model config.
    #[must_use]
    pub fn active_model(&self) -> &ModelConfig {
        self.model.active()
    }

    /// Running token count (base prompt + all counted steps).
    #[must_use]
    pub fn used_tokens(&self) -> u64 {
        self.tracker.total_tokens()
    }

    /// The emitter this executor publishes run events on.
    #[must_use]
    pub fn emitter(&self) -> &Arc<EventEmitter> {
        &self.emitter
    }

    /// Execute one step of the loop.
    #[instrument(skip_all, fields(run_id = %ctx.run_id))]
    pub async fn step(
        &mut self,
        transcript: &mut Transcript,
        inputs: &StepInputs,
        ctx: &ToolContext,
    ) -> Result<StepOutcome, RuntimeError> {
        let start = Instant::now();

        // Accounting first, promotion second: the selector always sees the
        // count for the transcript-so-far.
        let used = self.tracker.record(transcript)?;
        if self.model.promote_if_over(used) {
            let pair = self.model.pair();
            counter!("agent_model_promotions_total").increment(1);
            info!(
                used_tokens = used,
                threshold = pair.switch_threshold,
                model = %pair.long_context.name,
                "promoted to long-context model"
            );
            let _ = self.emitter.emit(RunEvent::ModelPromoted {
                base: BaseEvent::now(&*ctx.run_id),
                from: pair.short_context.name.clone(),
                to: pair.long_context.name.clone(),
                used_tokens: used,
                threshold: pair.switch_threshold,
            });
        }

        let plan = {
            let prepared = self.opts.trim.apply(transcript.steps());
            self.planner
                .plan(&prepared, inputs, self.model.active())
                .await
        };

        let outcome = match plan {
            Ok(Plan::Finish(finish)) => {
                debug!(output = %log_preview(&finish.output, OBSERVATION_PREVIEW_BYTES), "final answer");
                Ok(StepOutcome::Finished(finish))
            }
            Ok(Plan::Act(actions)) => {
                let before = transcript.len();
                // Actions execute and append strictly in emitted order.
                for action in actions {
                    let observation = self.execute_action(&action, ctx).await;
                    transcript.push(Step::new(action, observation));
                }
                // Accounting always follows transcript mutation.
                let _ = self.tracker.record(transcript)?;
                Ok(StepOutcome::Continue(transcript.steps()[before..].to_vec()))
            }
            Err(PlanError::MalformedOutput { raw }) => self.recover(transcript, raw, ctx).await,
            Err(err @ PlanError::Other(_)) => Err(RuntimeError::Plan(err)),
        };

        counter!("agent_steps_total").increment(1);
        histogram!("agent_step_duration_seconds").record(start.elapsed().as_secs_f64());
        outcome
    }

    /// Run one action: registry lookup, tool execution, observation capture.
    /// Never fails; lookup misses and tool errors become observation text.
    async fn execute_action(&self, action: &AgentAction, ctx: &ToolContext) -> String {
        let Some(tool) = self.tools.get(&action.tool) else {
            warn!(tool = %action.tool, "unknown tool requested");
            counter!("agent_invalid_tool_requests_total").increment(1);
            let _ = self.emitter.emit(RunEvent::InvalidToolRequested {
                base: BaseEvent::now(&*ctx.run_id),
                tool: action.tool.clone(),
            });
            return invalid_tool_observation(&action.tool, &self.tools.names());
        };

        let _ = self.emitter.emit(RunEvent::ToolExecutionStart {
            base: BaseEvent::now(&*ctx.run_id),
            tool: action.tool.clone(),
        });
        let start = Instant::now();
        let (observation, is_error) = match tool.run(&action.tool_input, ctx).await {
            Ok(text) => (text, false),
            Err(err) => {
                warn!(tool = %action.tool, %err, "tool failed");
                (err.to_string(), true)
            }
        };
        let duration_ms = elapsed_ms(start);

        counter!("agent_tool_executions_total", "tool" => action.tool.clone()).increment(1);
        histogram!("agent_tool_duration_seconds", "tool" => action.tool.clone())
            .record(start.elapsed().as_secs_f64());
        let _ = self.emitter.emit(RunEvent::ToolExecutionEnd {
            base: BaseEvent::now(&*ctx.run_id),
            tool: action.tool.clone(),
            is_error,
            duration_ms,
        });
        debug!(
            tool = %action.tool,
            duration_ms,
            observation = %log_preview(&observation, OBSERVATION_PREVIEW_BYTES),
            "tool executed"
        );
        observation
    }

    /// Turn a malformed planning output into a transcript entry, or re-raise
    /// under the hard-fail policy.
    async fn recover(
        &mut self,
        transcript: &mut Transcript,
        raw: String,
        ctx: &ToolContext,
    ) -> Result<StepOutcome, RuntimeError> {
        let Some(text) = self.opts.recovery.observation(&raw) else {
            return Err(RuntimeError::MalformedOutput { raw });
        };

        counter!("agent_parse_recoveries_total").increment(1);
        warn!(
            raw = %log_preview(&raw, OBSERVATION_PREVIEW_BYTES),
            "recovering from malformed model output"
        );

        let action = AgentAction::new(
            stride_tools::PARSE_RECOVERY_TOOL,
            Value::String(text),
            raw,
        );
        let observation = match PassthroughTool.run(&action.tool_input, ctx).await {
            Ok(text) => text,
            Err(err) => err.to_string(),
        };
        let step = Step::new(action, observation);
        transcript.push(step.clone());
        let _ = self.tracker.record(transcript)?;

        let _ = self.emitter.emit(RunEvent::ParseRecovered {
            base: BaseEvent::now(&*ctx.run_id),
        });
        Ok(StepOutcome::Continue(vec![step]))
    }
}

/// Elapsed wall time in milliseconds, reporting at least 1ms for any
/// non-zero duration (fast tools would otherwise read as "0ms").
fn elapsed_ms(start: Instant) -> u64 {
    let elapsed = start.elapsed();
    if elapsed.is_zero() {
        0
    } else {
        (elapsed.as_millis() as u64).max(1)
    }
}
