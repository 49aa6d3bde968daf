//! Wheel-position and axis notation shared by the two schemas.
//!
//! The logger names corners `FL`, `FR`, `RL`, `RR`; the simulator numbers
//! axles and names sides: `L1`, `R1`, `L2`, `R2`. Everything downstream
//! reasons in logger notation and converts to simulator notation only when a
//! target name is built.

use std::fmt;

/// One of the four wheel corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Corner {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Self::FrontLeft,
        Self::FrontRight,
        Self::RearLeft,
        Self::RearRight,
    ];

    /// Logger notation (`FL`, `FR`, `RL`, `RR`).
    #[must_use]
    pub fn logger_code(self) -> &'static str {
        match self {
            Self::FrontLeft => "FL",
            Self::FrontRight => "FR",
            Self::RearLeft => "RL",
            Self::RearRight => "RR",
        }
    }

    /// Simulator notation (`L1`, `R1`, `L2`, `R2`).
    #[must_use]
    pub fn sim_code(self) -> &'static str {
        match self {
            Self::FrontLeft => "L1",
            Self::FrontRight => "R1",
            Self::RearLeft => "L2",
            Self::RearRight => "R2",
        }
    }

    pub fn from_logger_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|corner| corner.logger_code().eq_ignore_ascii_case(code.trim()))
    }

    pub fn from_sim_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|corner| corner.sim_code().eq_ignore_ascii_case(code.trim()))
    }

    /// `FL=L1` style label used in match notes.
    #[must_use]
    pub fn pair_label(self) -> String {
        format!("{}={}", self.logger_code(), self.sim_code())
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.logger_code())
    }
}

/// Translation direction for [`translate_position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    LoggerToSim,
    SimToLogger,
}

/// Translates a position code between notations.
///
/// Returns `None` for codes the table does not know; callers skip the
/// candidate in that case.
pub fn translate_position(code: &str, direction: Direction) -> Option<&'static str> {
    match direction {
        Direction::LoggerToSim => Corner::from_logger_code(code).map(Corner::sim_code),
        Direction::SimToLogger => Corner::from_sim_code(code).map(Corner::logger_code),
    }
}

/// Finds the wheel corner a channel name refers to.
///
/// Whole tokens are preferred over raw substrings so that `FR` inside
/// `Front` does not win over an explicit `RL` elsewhere in the name. Logger
/// codes are checked before simulator codes at each stage.
pub fn extract_position(name: &str) -> Option<Corner> {
    let upper = name.to_uppercase();
    let tokens: Vec<&str> = upper
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|token| !token.is_empty())
        .collect();

    let by_token = Corner::ALL
        .into_iter()
        .find(|corner| tokens.contains(&corner.logger_code()))
        .or_else(|| {
            Corner::ALL
                .into_iter()
                .find(|corner| tokens.contains(&corner.sim_code()))
        });
    if by_token.is_some() {
        return by_token;
    }

    Corner::ALL
        .into_iter()
        .find(|corner| upper.contains(corner.logger_code()))
        .or_else(|| {
            Corner::ALL
                .into_iter()
                .find(|corner| upper.contains(corner.sim_code()))
        })
}

/// Vehicle axis, with the names each convention uses for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Self::X, Self::Y, Self::Z];

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
        }
    }

    /// `Longitudinal`, `Lateral`, `Vertical`.
    #[must_use]
    pub fn linear_name(self) -> &'static str {
        match self {
            Self::X => "Longitudinal",
            Self::Y => "Lateral",
            Self::Z => "Vertical",
        }
    }

    /// `Long`, `Lat`, `Vert` as used in logger channel names.
    #[must_use]
    pub fn short_name(self) -> &'static str {
        match self {
            Self::X => "Long",
            Self::Y => "Lat",
            Self::Z => "Vert",
        }
    }

    /// Rotation about this axis: `Roll`, `Pitch`, `Yaw`.
    #[must_use]
    pub fn rotation_name(self) -> &'static str {
        match self {
            Self::X => "Roll",
            Self::Y => "Pitch",
            Self::Z => "Yaw",
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|axis| axis.letter() == letter.to_ascii_uppercase())
    }

    /// Accepts the linear, short or rotation name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|axis| {
            axis.linear_name().eq_ignore_ascii_case(name)
                || axis.short_name().eq_ignore_ascii_case(name)
                || axis.rotation_name().eq_ignore_ascii_case(name)
        })
    }

    /// `Lateral (Y)`.
    #[must_use]
    pub fn linear_label(self) -> String {
        format!("{} ({})", self.linear_name(), self.letter())
    }

    /// `Roll (X)`.
    #[must_use]
    pub fn rotation_label(self) -> String {
        format!("{} ({})", self.rotation_name(), self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_table_is_bidirectional() {
        for corner in Corner::ALL {
            let sim = translate_position(corner.logger_code(), Direction::LoggerToSim);
            assert_eq!(sim, Some(corner.sim_code()));
            let back = translate_position(corner.sim_code(), Direction::SimToLogger);
            assert_eq!(back, Some(corner.logger_code()));
        }
    }

    #[test]
    fn unknown_codes_do_not_translate() {
        assert_eq!(translate_position("XX", Direction::LoggerToSim), None);
        assert_eq!(translate_position("L1", Direction::LoggerToSim), None);
        assert_eq!(translate_position("", Direction::SimToLogger), None);
    }

    #[test]
    fn extracts_logger_positions() {
        assert_eq!(extract_position("FL Wheel Speed"), Some(Corner::FrontLeft));
        assert_eq!(extract_position("Susp Pos RR"), Some(Corner::RearRight));
        assert_eq!(extract_position("rl rotor temp 2"), Some(Corner::RearLeft));
    }

    #[test]
    fn sim_positions_come_back_in_logger_notation() {
        assert_eq!(extract_position("Jnc_R1"), Some(Corner::FrontRight));
        assert_eq!(extract_position("T_Rtr_L2"), Some(Corner::RearLeft));
    }

    #[test]
    fn whole_tokens_win_over_substrings() {
        // "FRONT" contains "FR" but the explicit token is RL.
        assert_eq!(extract_position("Front Brake RL"), Some(Corner::RearLeft));
        // Falls back to substring scanning when no token matches.
        assert_eq!(extract_position("WheelSpeedFL"), Some(Corner::FrontLeft));
    }

    #[test]
    fn no_position_is_none() {
        assert_eq!(extract_position("Engine Speed"), None);
        assert_eq!(extract_position(""), None);
    }

    #[test]
    fn axis_names() {
        assert_eq!(Axis::from_letter('y'), Some(Axis::Y));
        assert_eq!(Axis::from_name("lat"), Some(Axis::Y));
        assert_eq!(Axis::from_name("Yaw"), Some(Axis::Z));
        assert_eq!(Axis::from_name("Longitudinal"), Some(Axis::X));
        assert_eq!(Axis::Y.linear_label(), "Lateral (Y)");
        assert_eq!(Axis::X.rotation_label(), "Roll (X)");
        assert_eq!(Axis::from_letter('q'), None);
    }
}
