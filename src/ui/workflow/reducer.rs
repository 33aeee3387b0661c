use crate::ui::mvi::Reducer;

use super::intent::WorkflowIntent;
use super::state::WorkflowState;

pub struct WorkflowReducer;

impl Reducer for WorkflowReducer {
    type State = WorkflowState;
    type Intent = WorkflowIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            WorkflowIntent::Select(file) => WorkflowState {
                selected: Some(file),
                hover: false,
                ..state
            },

            WorkflowIntent::HoverStart => WorkflowState {
                hover: true,
                ..state
            },

            WorkflowIntent::HoverEnd => WorkflowState {
                hover: false,
                ..state
            },

            WorkflowIntent::Begin => WorkflowState {
                busy: true,
                ..state
            },

            WorkflowIntent::Finish { panel } => match panel {
                Some(panel) => WorkflowState {
                    busy: false,
                    results: Some(panel),
                    scroll: 0,
                    ..state
                },
                None => WorkflowState {
                    busy: false,
                    ..state
                },
            },

            WorkflowIntent::ScrollUp(lines) => WorkflowState {
                scroll: state.scroll.saturating_sub(lines),
                ..state
            },

            WorkflowIntent::ScrollDown { lines, max } => {
                if state.results.is_none() {
                    return state;
                }
                WorkflowState {
                    scroll: state.scroll.saturating_add(lines).min(max),
                    ..state
                }
            }

            WorkflowIntent::Reset => WorkflowState::default(),
        }
    }
}
