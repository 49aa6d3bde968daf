use super::{Candidate, PatternRule, Refinement, RuleFamily, Targets};
use crate::notation::{Axis, Corner};

const fn fixed(
    family: RuleFamily,
    sources: &'static [&'static str],
    candidates: &'static [Candidate],
) -> PatternRule {
    PatternRule {
        family,
        sources,
        targets: Targets::Fixed(candidates),
        refinement: Refinement::None,
        axis: None,
    }
}

const fn at_position(
    family: RuleFamily,
    sources: &'static [&'static str],
    candidates: &'static [Candidate],
) -> PatternRule {
    PatternRule {
        family,
        sources,
        targets: Targets::AtPosition(candidates),
        refinement: Refinement::None,
        axis: None,
    }
}

const fn acceleration(
    sources: &'static [&'static str],
    candidates: &'static [Candidate],
    axis: Axis,
) -> PatternRule {
    PatternRule {
        family: RuleFamily::Acceleration,
        sources,
        targets: Targets::Fixed(candidates),
        refinement: Refinement::None,
        axis: Some(axis),
    }
}

const fn gyroscope(
    sources: &'static [&'static str],
    candidates: &'static [Candidate],
    axis: Axis,
) -> PatternRule {
    PatternRule {
        family: RuleFamily::Gyroscope,
        sources,
        targets: Targets::Fixed(candidates),
        refinement: Refinement::EulerFrame,
        axis: Some(axis),
    }
}

const fn brake(
    sources: &'static [&'static str],
    corners: &'static [Corner],
    note: &'static str,
) -> PatternRule {
    PatternRule {
        family: RuleFamily::Brake,
        sources,
        targets: Targets::Corners {
            prefix: "PbkCh_",
            corners,
            confidence: 0.95,
            note,
        },
        refinement: Refinement::None,
        axis: None,
    }
}

/// Built-in rules, grouped by family in application order.
///
/// Road-frame accelerations (`_Rd`) sit 0.05 below the sprung-mass ones.
pub static STANDARD_RULES: &[PatternRule] = &[
    // Acceleration
    acceleration(
        &[
            "C185 G Force Lat",
            "F IMU Vehicle Accel Lateral",
            "R IMU Vehicle Accel Lateral",
        ],
        &[
            Candidate {
                target: "Ay_SM",
                confidence: 1.0,
                note: "{axis} acceleration",
            },
            Candidate {
                target: "Ay_Rd",
                confidence: 0.95,
                note: "{axis} acceleration",
            },
        ],
        Axis::Y,
    ),
    acceleration(
        &[
            "C185 G Force Long",
            "F IMU Vehicle Accel Long",
            "R IMU Vehicle Accel Long",
        ],
        &[
            Candidate {
                target: "Ax_SM",
                confidence: 1.0,
                note: "{axis} acceleration",
            },
            Candidate {
                target: "Ax_Rd",
                confidence: 0.95,
                note: "{axis} acceleration",
            },
        ],
        Axis::X,
    ),
    acceleration(
        &[
            "C185 G Force Vert",
            "F IMU Vehicle Accel Vert",
            "R IMU Vehicle Accel Vert",
        ],
        &[
            Candidate {
                target: "Az_SM",
                confidence: 1.0,
                note: "{axis} acceleration",
            },
            Candidate {
                target: "Az_Rd",
                confidence: 0.95,
                note: "{axis} acceleration",
            },
        ],
        Axis::Z,
    ),
    // Gyroscope
    gyroscope(
        &["F IMU Gyro Roll Velocity", "R IMU Gyro Roll Velocity"],
        &[
            Candidate {
                target: "AVx",
                confidence: 1.0,
                note: "{rotation} rate",
            },
            Candidate {
                target: "AV_R",
                confidence: 1.0,
                note: "{rotation} rate",
            },
        ],
        Axis::X,
    ),
    gyroscope(
        &["F IMU Gyro Pitch Velocity", "R IMU Gyro Pitch Velocity"],
        &[
            Candidate {
                target: "AVy",
                confidence: 1.0,
                note: "{rotation} rate",
            },
            Candidate {
                target: "AV_P",
                confidence: 1.0,
                note: "{rotation} rate",
            },
        ],
        Axis::Y,
    ),
    gyroscope(
        &["F IMU Gyro Yaw Velocity", "R IMU Gyro Yaw Velocity"],
        &[
            Candidate {
                target: "AVz",
                confidence: 1.0,
                note: "{rotation} rate",
            },
            Candidate {
                target: "AV_Y",
                confidence: 1.0,
                note: "{rotation} rate",
            },
        ],
        Axis::Z,
    ),
    // Wheel
    at_position(
        RuleFamily::Wheel,
        &["Wheel Speed"],
        &[Candidate {
            target: "AVy_",
            confidence: 1.0,
            note: "Wheel spin (rpm)",
        }],
    ),
    // Suspension
    at_position(
        RuleFamily::Suspension,
        &["Susp Pos"],
        &[
            Candidate {
                target: "Jnc_",
                confidence: 1.0,
                note: "Jounce (compression)",
            },
            Candidate {
                target: "CmpT_",
                confidence: 0.95,
                note: "Total compression",
            },
        ],
    ),
    // Brake
    brake(
        &["Brake Pressure Front"],
        &[Corner::FrontLeft, Corner::FrontRight],
        "Front brake pressure",
    ),
    brake(
        &["Brake Pressure Rear"],
        &[Corner::RearLeft, Corner::RearRight],
        "Rear brake pressure",
    ),
    // Temperature
    PatternRule {
        family: RuleFamily::Temperature,
        sources: &["Rotor Temp"],
        targets: Targets::AtPosition(&[Candidate {
            target: "T_Rtr_",
            confidence: 0.95,
            note: "Rotor temperature",
        }]),
        refinement: Refinement::PeakSensor,
        axis: None,
    },
    // Engine/Powertrain
    fixed(
        RuleFamily::Powertrain,
        &["Engine Speed"],
        &[Candidate {
            target: "AV_Eng",
            confidence: 1.0,
            note: "Engine speed measurement",
        }],
    ),
    fixed(
        RuleFamily::Powertrain,
        &["Throttle Position"],
        &[
            Candidate {
                target: "Throttle",
                confidence: 1.0,
                note: "Throttle position measurement",
            },
            Candidate {
                target: "Thr_Eng",
                confidence: 0.98,
                note: "Throttle position measurement",
            },
            Candidate {
                target: "Thr_Intl",
                confidence: 0.95,
                note: "Throttle position measurement",
            },
        ],
    ),
    fixed(
        RuleFamily::Powertrain,
        &["Gear"],
        &[
            Candidate {
                target: "GearStat",
                confidence: 1.0,
                note: "Gear measurement",
            },
            Candidate {
                target: "Gear_CL",
                confidence: 0.90,
                note: "Gear measurement",
            },
            Candidate {
                target: "Gear_OL",
                confidence: 0.85,
                note: "Gear measurement",
            },
        ],
    ),
    // GPS
    fixed(
        RuleFamily::Gps,
        &["GPS Altitude"],
        &[Candidate {
            target: "GPS_Altitude",
            confidence: 1.0,
            note: "GPS altitude",
        }],
    ),
    fixed(
        RuleFamily::Gps,
        &["GPS Latitude"],
        &[
            Candidate {
                target: "GPS_Lat",
                confidence: 1.0,
                note: "GPS latitude",
            },
            Candidate {
                target: "GPS_LatA",
                confidence: 0.95,
                note: "GPS latitude",
            },
        ],
    ),
    fixed(
        RuleFamily::Gps,
        &["GPS Longitude"],
        &[
            Candidate {
                target: "GPS_Long",
                confidence: 1.0,
                note: "GPS longitude",
            },
            Candidate {
                target: "GPSlongA",
                confidence: 1.0,
                note: "GPS longitude",
            },
        ],
    ),
    fixed(
        RuleFamily::Gps,
        &["GPS Speed"],
        &[Candidate {
            target: "Vx",
            confidence: 0.85,
            note: "GPS speed",
        }],
    ),
    // Velocity
    fixed(
        RuleFamily::Velocity,
        &["Ground Speed"],
        &[
            Candidate {
                target: "Vx",
                confidence: 1.0,
                note: "Longitudinal velocity",
            },
            Candidate {
                target: "Vx_SM",
                confidence: 1.0,
                note: "Longitudinal velocity",
            },
            Candidate {
                target: "Vx_Fwd",
                confidence: 0.95,
                note: "Longitudinal velocity",
            },
        ],
    ),
    fixed(
        RuleFamily::Velocity,
        &["Drive Speed"],
        &[Candidate {
            target: "Vx",
            confidence: 0.90,
            note: "Longitudinal velocity",
        }],
    ),
    // Fuel
    fixed(
        RuleFamily::Fuel,
        &["Fuel Flow"],
        &[Candidate {
            target: "Qfuel",
            confidence: 1.0,
            note: "Fuel measurement",
        }],
    ),
    fixed(
        RuleFamily::Fuel,
        &["Fuel Used M1"],
        &[Candidate {
            target: "Mfuel",
            confidence: 1.0,
            note: "Fuel measurement",
        }],
    ),
    // Distance
    fixed(
        RuleFamily::Distance,
        &["Odometer"],
        &[Candidate {
            target: "Station",
            confidence: 0.90,
            note: "Distance/path measurement",
        }],
    ),
    fixed(
        RuleFamily::Distance,
        &["Trip Distance"],
        &[Candidate {
            target: "Station",
            confidence: 0.85,
            note: "Distance/path measurement",
        }],
    ),
    fixed(
        RuleFamily::Distance,
        &["Distance"],
        &[Candidate {
            target: "Station",
            confidence: 0.90,
            note: "Distance/path measurement",
        }],
    ),
    fixed(
        RuleFamily::Distance,
        &["Lap Distance"],
        &[Candidate {
            target: "Sta_Road",
            confidence: 0.80,
            note: "Distance/path measurement",
        }],
    ),
    // Steering
    fixed(
        RuleFamily::Steering,
        &["Steered Angle", "Steer Angle"],
        &[
            Candidate {
                target: "Steer_SW",
                confidence: 0.95,
                note: "Steering wheel angle",
            },
            Candidate {
                target: "Steer_L1",
                confidence: 0.90,
                note: "FL wheel steer angle",
            },
            Candidate {
                target: "Steer_R1",
                confidence: 0.90,
                note: "FR wheel steer angle",
            },
        ],
    ),
];
