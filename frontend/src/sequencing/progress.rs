use std::fmt;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStep {
    pub delay_ms: u32,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    Empty,
    DelaysNotIncreasing { index: usize },
    ValuesNotIncreasing { index: usize },
    ValueOutOfRange { value: u8 },
    DoesNotFinish { last: u8 },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::Empty => write!(f, "progress schedule has no steps"),
            ScheduleError::DelaysNotIncreasing { index } => {
                write!(f, "step {} does not fire after the previous step", index)
            }
            ScheduleError::ValuesNotIncreasing { index } => {
                write!(f, "step {} does not advance the progress value", index)
            }
            ScheduleError::ValueOutOfRange { value } => write!(f, "progress value {} exceeds 100", value),
            ScheduleError::DoesNotFinish { last } => {
                write!(f, "schedule ends at {} instead of 100", last)
            }
        }
    }
}

/// Timed progress values for one navigation cycle. Delays are measured from
/// the start of the cycle; the indicator hides `trailing_ms` after the last step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSchedule {
    steps: Vec<ProgressStep>,
    trailing_ms: u32,
}

impl ProgressSchedule {
    pub fn new(steps: Vec<ProgressStep>, trailing_ms: u32) -> Result<Self, ScheduleError> {
        let last = steps.last().ok_or(ScheduleError::Empty)?;
        if last.value != 100 {
            return Err(ScheduleError::DoesNotFinish { last: last.value });
        }
        for (index, step) in steps.iter().enumerate() {
            if step.value > 100 {
                return Err(ScheduleError::ValueOutOfRange { value: step.value });
            }
            if index == 0 {
                if step.value == 0 {
                    return Err(ScheduleError::ValuesNotIncreasing { index });
                }
                continue;
            }
            let previous = steps[index - 1];
            if step.delay_ms <= previous.delay_ms {
                return Err(ScheduleError::DelaysNotIncreasing { index });
            }
            if step.value <= previous.value {
                return Err(ScheduleError::ValuesNotIncreasing { index });
            }
        }
        Ok(ProgressSchedule { steps, trailing_ms })
    }

    pub fn steps(&self) -> &[ProgressStep] {
        &self.steps
    }

    pub fn finish_delay_ms(&self) -> u32 {
        self.steps.last().map(|s| s.delay_ms).unwrap_or(0) + self.trailing_ms
    }
}

impl Default for ProgressSchedule {
    fn default() -> Self {
        ProgressSchedule {
            steps: vec![
                ProgressStep { delay_ms: 100, value: 30 },
                ProgressStep { delay_ms: 200, value: 60 },
                ProgressStep { delay_ms: 400, value: 90 },
                ProgressStep { delay_ms: 600, value: 100 },
            ],
            trailing_ms: 200,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressState {
    pub is_active: bool,
    pub value: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Step(usize),
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressAction {
    Start(CycleId),
    Tick(CycleId, Tick),
    Cancel,
}

/// Progress state for the current navigation cycle. Ticks that belong to any
/// other cycle are ignored, and the value never moves backwards within a cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSequencer {
    schedule: ProgressSchedule,
    cycle: Option<CycleId>,
    state: ProgressState,
}

impl ProgressSequencer {
    pub fn new(schedule: ProgressSchedule) -> Self {
        ProgressSequencer {
            schedule,
            cycle: None,
            state: ProgressState::default(),
        }
    }

    pub fn state(&self) -> ProgressState {
        self.state
    }

    pub fn current_cycle(&self) -> Option<CycleId> {
        self.cycle
    }

    /// Applies an action; returns whether the state or the owning cycle changed.
    pub fn apply(&mut self, action: ProgressAction) -> bool {
        let before = (self.state, self.cycle);
        match action {
            ProgressAction::Start(cycle) => {
                self.cycle = Some(cycle);
                self.state = ProgressState { is_active: true, value: 0 };
            }
            ProgressAction::Tick(cycle, tick) => {
                if self.cycle != Some(cycle) {
                    return false;
                }
                match tick {
                    Tick::Step(index) => {
                        if let Some(step) = self.schedule.steps().get(index) {
                            self.state.value = self.state.value.max(step.value);
                        }
                    }
                    Tick::Finish => {
                        if self.state.value >= 100 {
                            self.state.is_active = false;
                            self.cycle = None;
                        }
                    }
                }
            }
            ProgressAction::Cancel => {
                self.cycle = None;
                self.state.is_active = false;
            }
        }
        (self.state, self.cycle) != before
    }
}

impl Reducible for ProgressSequencer {
    type Action = ProgressAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        if next.apply(action) {
            Rc::new(next)
        } else {
            self
        }
    }
}

/// Pending timers of one cycle. Dropping or clearing the group cancels them.
pub struct TimerGroup<H = Timeout> {
    timers: Vec<H>,
}

impl<H> Default for TimerGroup<H> {
    fn default() -> Self {
        TimerGroup { timers: Vec::new() }
    }
}

impl<H> TimerGroup<H> {
    pub fn track(&mut self, timer: H) {
        self.timers.push(timer);
    }

    pub fn cancel_all(&mut self) {
        // handles cancel themselves on drop
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

/// Cancels whatever is left of the previous cycle, starts `cycle` and
/// schedules each of its ticks through `timer`.
pub fn schedule_cycle<H, T, D>(
    group: &mut TimerGroup<H>,
    schedule: &ProgressSchedule,
    cycle: CycleId,
    mut timer: T,
    dispatch: D,
) where
    T: FnMut(u32, Box<dyn FnOnce()>) -> H,
    D: Fn(ProgressAction) + Clone + 'static,
{
    group.cancel_all();
    dispatch(ProgressAction::Start(cycle));

    for (index, step) in schedule.steps().iter().enumerate() {
        let dispatch = dispatch.clone();
        group.track(timer(
            step.delay_ms,
            Box::new(move || dispatch(ProgressAction::Tick(cycle, Tick::Step(index)))),
        ));
    }
    group.track(timer(
        schedule.finish_delay_ms(),
        Box::new(move || dispatch(ProgressAction::Tick(cycle, Tick::Finish))),
    ));
}

/// Runs one progress cycle per distinct `path`.
#[hook]
pub fn use_navigation_progress(path: String, schedule: Rc<ProgressSchedule>) -> ProgressState {
    let sequencer = {
        let schedule = schedule.clone();
        use_reducer(move || ProgressSequencer::new((*schedule).clone()))
    };
    let timers = use_mut_ref(TimerGroup::<Timeout>::default);
    let cycle_counter = use_mut_ref(|| 0u64);

    {
        let dispatcher = sequencer.dispatcher();
        use_effect_with_deps(
            move |path: &String| {
                let cycle = {
                    let mut counter = cycle_counter.borrow_mut();
                    *counter += 1;
                    CycleId(*counter)
                };
                tracing::debug!(path = %path, cycle = cycle.0, "navigation progress started");

                let dispatch = {
                    let dispatcher = dispatcher.clone();
                    move |action: ProgressAction| dispatcher.dispatch(action)
                };
                schedule_cycle(
                    &mut timers.borrow_mut(),
                    &schedule,
                    cycle,
                    |delay, callback| Timeout::new(delay, callback),
                    dispatch,
                );

                move || {
                    timers.borrow_mut().cancel_all();
                    dispatcher.dispatch(ProgressAction::Cancel);
                }
            },
            path,
        );
    }

    sequencer.state()
}

/// Thin bar along the top of the viewport that tracks route changes.
#[function_component(NavigationProgress)]
pub fn navigation_progress() -> Html {
    let path = use_location()
        .map(|location| location.path().to_string())
        .unwrap_or_default();
    let schedule = use_memo(|_| ProgressSchedule::default(), ());
    let state = use_navigation_progress(path, schedule);

    let style = format!(
        "width: {}%; opacity: {};",
        state.value,
        if state.is_active { 1 } else { 0 }
    );

    html! {
        <div
            class="nav-progress"
            role="progressbar"
            aria-hidden={(!state.is_active).to_string()}
            aria-valuemin="0"
            aria-valuemax="100"
            aria-valuenow={state.value.to_string()}
        >
            <div class="nav-progress__bar" style={style}></div>
        </div>
    }
}
