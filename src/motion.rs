use crate::command::Motion;
use crate::config::Timing;
use crate::time::TimeDuration;
use crate::types::{Chord, Input, MoveError, MoveStep};
use heapless::Vec;

/// A timed motion input: directional holds, releases and a final attack.
///
/// Steps refer to symbolic [`Input`]s, so one definition serves both facing
/// directions and any attack button. Definitions are built once and only read
/// afterwards.
///
/// # Type Parameters
/// * `D` - The duration type
/// * `N` - Maximum number of steps this move can hold
#[derive(Debug, Clone)]
pub struct MoveDefinition<D: TimeDuration, const N: usize> {
    steps: Vec<MoveStep<D>, N>,
}

impl<D: TimeDuration, const N: usize> MoveDefinition<D, N> {
    /// Creates a new move builder.
    pub fn builder() -> MoveBuilder<D, N> {
        MoveBuilder::new()
    }

    /// The steps in execution order.
    pub fn steps(&self) -> &[MoveStep<D>] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Returns a reference to the step at the given index.
    pub fn get_step(&self, index: usize) -> Option<&MoveStep<D>> {
        self.steps.get(index)
    }

    /// Total time the move blocks for: every hold plus every gap.
    pub fn total_duration(&self) -> D {
        let total_millis: u64 = self.steps.iter().map(|s| s.duration().as_millis()).sum();
        D::from_millis(total_millis)
    }

    /// Quarter-circle forward: ↓, ↘, → then tap the attack.
    pub fn quarter_circle_forward(timing: &Timing<D>) -> Result<Self, MoveError> {
        MoveBuilder::new()
            .hold(&[Input::Down], timing.step)?
            .release(timing.gap)?
            .hold(&[Input::Down, Input::Forward], timing.step)?
            .release(timing.gap)?
            .hold(&[Input::Forward], timing.step.halved())?
            .tap(timing)?
            .release(D::ZERO)?
            .build()
    }

    /// Anti-air: a short →, a short ↓, then ↘ and tap the attack.
    pub fn anti_air(timing: &Timing<D>) -> Result<Self, MoveError> {
        MoveBuilder::new()
            .hold(&[Input::Forward], timing.step.halved())?
            .release(timing.gap.halved())?
            .hold(&[Input::Down], timing.step.halved())?
            .release(timing.gap.halved())?
            .hold(&[Input::Down, Input::Forward], timing.step)?
            .tap(timing)?
            .release(D::ZERO)?
            .build()
    }

    /// Spin kick: ↓, ↙, ← then tap the attack.
    pub fn spin_kick(timing: &Timing<D>) -> Result<Self, MoveError> {
        MoveBuilder::new()
            .hold(&[Input::Down], timing.step)?
            .release(timing.gap)?
            .hold(&[Input::Down, Input::Back], timing.step)?
            .release(timing.gap)?
            .hold(&[Input::Back], timing.step.halved())?
            .tap(timing)?
            .release(D::ZERO)?
            .build()
    }
}

/// Builder for constructing validated moves.
#[derive(Debug)]
pub struct MoveBuilder<D: TimeDuration, const N: usize> {
    steps: Vec<MoveStep<D>, N>,
}

impl<D: TimeDuration, const N: usize> MoveBuilder<D, N> {
    /// Creates a new empty move builder.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Asserts exactly `inputs` for `duration`, without releasing afterwards.
    ///
    /// # Errors
    /// * `TooManyKeys` - More inputs than fit in one report
    /// * `CapacityExceeded` - The move is full
    pub fn hold(mut self, inputs: &[Input], duration: D) -> Result<Self, MoveError> {
        let inputs = Chord::from_slice(inputs).map_err(|_| MoveError::TooManyKeys)?;
        self.push(MoveStep::Hold { inputs, duration })?;
        Ok(self)
    }

    /// Releases every key, then waits `gap`.
    ///
    /// # Errors
    /// * `CapacityExceeded` - The move is full
    pub fn release(mut self, gap: D) -> Result<Self, MoveError> {
        self.push(MoveStep::Release { gap })?;
        Ok(self)
    }

    /// Holds the attack alone for `timing.tap`, releases, then waits
    /// `timing.gap`.
    pub fn tap(self, timing: &Timing<D>) -> Result<Self, MoveError> {
        self.hold(&[Input::Attack], timing.tap)?.release(timing.gap)
    }

    /// Builds and validates the move.
    ///
    /// # Errors
    /// * `EmptyMove` - No steps were added
    pub fn build(self) -> Result<MoveDefinition<D, N>, MoveError> {
        if self.steps.is_empty() {
            return Err(MoveError::EmptyMove);
        }

        Ok(MoveDefinition { steps: self.steps })
    }

    fn push(&mut self, step: MoveStep<D>) -> Result<(), MoveError> {
        self.steps.push(step).map_err(|_| MoveError::CapacityExceeded)
    }
}

impl<D: TimeDuration, const N: usize> Default for MoveBuilder<D, N> {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in moves, constructed once from a [`Timing`].
#[derive(Debug, Clone)]
pub struct MoveLibrary<D: TimeDuration, const N: usize> {
    quarter_circle_forward: MoveDefinition<D, N>,
    anti_air: MoveDefinition<D, N>,
    spin_kick: MoveDefinition<D, N>,
}

impl<D: TimeDuration, const N: usize> MoveLibrary<D, N> {
    /// Builds every move in the library.
    ///
    /// # Errors
    /// * `CapacityExceeded` - `N` is too small for one of the moves
    pub fn new(timing: &Timing<D>) -> Result<Self, MoveError> {
        Ok(Self {
            quarter_circle_forward: MoveDefinition::quarter_circle_forward(timing)?,
            anti_air: MoveDefinition::anti_air(timing)?,
            spin_kick: MoveDefinition::spin_kick(timing)?,
        })
    }

    /// Looks up the definition for a motion.
    pub fn get(&self, motion: Motion) -> &MoveDefinition<D, N> {
        match motion {
            Motion::QuarterCircleForward => &self.quarter_circle_forward,
            Motion::AntiAir => &self.anti_air,
            Motion::SpinKick => &self.spin_kick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::MillisDuration;

    type Ms = MillisDuration;

    fn timing() -> Timing<Ms> {
        Timing::reference()
    }

    #[test]
    fn quarter_circle_forward_duration_matches_step_sum() {
        let mv = MoveDefinition::<Ms, 8>::quarter_circle_forward(&timing()).unwrap();
        // STEP + GAP + STEP + GAP + STEP/2 + TAP + GAP
        assert_eq!(mv.total_duration(), MillisDuration(28 + 16 + 28 + 16 + 14 + 22 + 16));
        assert_eq!(mv.step_count(), 8);
    }

    #[test]
    fn anti_air_uses_half_steps_and_half_gaps() {
        let mv = MoveDefinition::<Ms, 8>::anti_air(&timing()).unwrap();
        assert_eq!(mv.total_duration(), MillisDuration(14 + 8 + 14 + 8 + 28 + 22 + 16));

        match mv.get_step(0) {
            Some(MoveStep::Hold { inputs, duration }) => {
                assert_eq!(inputs.as_slice(), &[Input::Forward]);
                assert_eq!(*duration, MillisDuration(14));
            }
            other => panic!("unexpected first step: {:?}", other),
        }
    }

    #[test]
    fn spin_kick_moves_backward() {
        let mv = MoveDefinition::<Ms, 8>::spin_kick(&timing()).unwrap();
        match mv.get_step(2) {
            Some(MoveStep::Hold { inputs, .. }) => {
                assert_eq!(inputs.as_slice(), &[Input::Down, Input::Back]);
            }
            other => panic!("unexpected third step: {:?}", other),
        }
    }

    #[test]
    fn every_move_ends_with_a_zero_gap_release() {
        let library = MoveLibrary::<Ms, 8>::new(&timing()).unwrap();
        for motion in [Motion::QuarterCircleForward, Motion::AntiAir, Motion::SpinKick] {
            let steps = library.get(motion).steps();
            assert!(matches!(
                steps.last(),
                Some(MoveStep::Release { gap }) if *gap == MillisDuration(0)
            ));
        }
    }

    #[test]
    fn builder_rejects_empty_moves() {
        let result = MoveBuilder::<Ms, 4>::new().build();
        assert_eq!(result.unwrap_err(), MoveError::EmptyMove);
    }

    #[test]
    fn builder_reports_capacity_exceeded() {
        let result = MoveDefinition::<Ms, 4>::quarter_circle_forward(&timing());
        assert_eq!(result.unwrap_err(), MoveError::CapacityExceeded);
        assert!(MoveLibrary::<Ms, 4>::new(&timing()).is_err());
    }

    #[test]
    fn builder_rejects_oversized_chords() {
        let inputs = [Input::Up; 7];
        let result = MoveBuilder::<Ms, 4>::new().hold(&inputs, MillisDuration(10));
        assert_eq!(result.unwrap_err(), MoveError::TooManyKeys);
    }
}
