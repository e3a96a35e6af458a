use std::fmt;

/// Flight verdict after collision resolution. Landed and Crashed are
/// terminal: once set, the physics step becomes a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightStatus {
    Flying,
    Landed,
    Crashed,
}

impl FlightStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, FlightStatus::Flying)
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FlightStatus::Flying => write!(f, "Flying"),
            FlightStatus::Landed => write!(f, "Landed"),
            FlightStatus::Crashed => write!(f, "Crashed"),
        }
    }
}
