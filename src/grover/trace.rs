use std::fmt::Display;

/// One step recorded while driving the amplitude state
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    Initialize { move_states: usize },
    Round { index: usize, threshold: usize },
    Apply { label: String },
    Undo { label: String },
    Renormalize { drift: f64 },
}

impl Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceEvent::Initialize { move_states } => write!(f, "init uniform {}", move_states),
            TraceEvent::Round { index, threshold } => write!(f, "round {} threshold {}", index, threshold),
            TraceEvent::Apply { label } => write!(f, "apply {}", label),
            TraceEvent::Undo { label } => write!(f, "undo {}", label),
            TraceEvent::Renormalize { drift } => write!(f, "renormalize drift {:.3e}", drift),
        }
    }
}

pub type Trace = Vec<TraceEvent>;

/// Labels of the operators applied, in order
pub fn applied_labels(trace: &[TraceEvent]) -> Vec<&str> {
    trace.iter()
        .filter_map(|event| match event {
            TraceEvent::Apply { label } | TraceEvent::Undo { label } => Some(label.as_str()),
            _ => None,
        })
        .collect()
}
