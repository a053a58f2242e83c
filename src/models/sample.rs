/// A named data series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    System,
    Docker,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::System, Channel::Docker];

    pub fn label(&self) -> &'static str {
        match self {
            Channel::System => "System",
            Channel::Docker => "Docker",
        }
    }

    /// Abbreviation used in the marker legend.
    pub fn short(&self) -> &'static str {
        match self {
            Channel::System => "Sys",
            Channel::Docker => "Doc",
        }
    }
}

/// One observation: elapsed time since session start and GB used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time:  f64,
    pub value: f64,
}
