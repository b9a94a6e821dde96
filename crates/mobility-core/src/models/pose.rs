// ABOUTME: Pose and measurement identities for the mobility test battery
// ABOUTME: Maps each physical test to the joint angles and distances it is scored on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AssessmentError;

/// Physical test being scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoseKind {
    /// Full-depth bodyweight squat, heels down
    DeepSquat,
    /// Standing forward bend reaching toward the floor
    ForwardFold,
    /// Behind-the-back reach testing shoulder rotation
    ApleyScratchTest,
    /// Lunge toward a wall testing ankle dorsiflexion
    KneeToWallTest,
}

impl PoseKind {
    /// Every supported pose in capture order
    pub const ALL: [Self; 4] = [
        Self::DeepSquat,
        Self::ForwardFold,
        Self::ApleyScratchTest,
        Self::KneeToWallTest,
    ];

    /// Stable snake_case identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DeepSquat => "deep_squat",
            Self::ForwardFold => "forward_fold",
            Self::ApleyScratchTest => "apley_scratch_test",
            Self::KneeToWallTest => "knee_to_wall_test",
        }
    }

    /// Name shown to users and sent to the report generator
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::DeepSquat => "Deep Squat",
            Self::ForwardFold => "Forward Fold",
            Self::ApleyScratchTest => "Apley Scratch Test",
            Self::KneeToWallTest => "Knee to Wall Test",
        }
    }

    /// Measurements a complete report states for this pose
    #[must_use]
    pub const fn expected_measurements(&self) -> &'static [MeasurementKind] {
        match self {
            Self::DeepSquat => &[
                MeasurementKind::Hip,
                MeasurementKind::Knee,
                MeasurementKind::Ankle,
            ],
            Self::ForwardFold => &[MeasurementKind::Hip],
            Self::ApleyScratchTest => &[MeasurementKind::FingerGap],
            Self::KneeToWallTest => &[MeasurementKind::Ankle, MeasurementKind::WallDistance],
        }
    }
}

impl fmt::Display for PoseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for PoseKind {
    type Err = AssessmentError;

    /// Accepts `deep_squat`, `deep-squat`, `Deep Squat` and `DeepSquat`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "deepsquat" => Ok(Self::DeepSquat),
            "forwardfold" => Ok(Self::ForwardFold),
            "apleyscratchtest" | "apleyscratch" => Ok(Self::ApleyScratchTest),
            "kneetowalltest" | "kneetowall" => Ok(Self::KneeToWallTest),
            _ => Err(AssessmentError::UnknownPose(s.trim().to_owned())),
        }
    }
}

/// Unit a measurement is stated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementUnit {
    /// Joint angle
    Degrees,
    /// Linear distance
    Centimeters,
}

impl MeasurementUnit {
    /// Short unit suffix
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Degrees => "°",
            Self::Centimeters => "cm",
        }
    }
}

/// Named joint angle or distance extracted from a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementKind {
    /// Hip angle
    Hip,
    /// Knee angle
    Knee,
    /// Ankle angle
    Ankle,
    /// Shoulder angle
    Shoulder,
    /// Elbow angle
    Elbow,
    /// Gap between fingertips behind the back
    FingerGap,
    /// Distance between toes and wall
    WallDistance,
}

impl MeasurementKind {
    /// Every recognised measurement
    pub const ALL: [Self; 7] = [
        Self::Hip,
        Self::Knee,
        Self::Ankle,
        Self::Shoulder,
        Self::Elbow,
        Self::FingerGap,
        Self::WallDistance,
    ];

    /// Stable snake_case identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hip => "hip",
            Self::Knee => "knee",
            Self::Ankle => "ankle",
            Self::Shoulder => "shoulder",
            Self::Elbow => "elbow",
            Self::FingerGap => "finger_gap",
            Self::WallDistance => "wall_distance",
        }
    }

    /// Unit the measurement is expressed in
    #[must_use]
    pub const fn unit(&self) -> MeasurementUnit {
        match self {
            Self::FingerGap | Self::WallDistance => MeasurementUnit::Centimeters,
            Self::Hip | Self::Knee | Self::Ankle | Self::Shoulder | Self::Elbow => {
                MeasurementUnit::Degrees
            }
        }
    }

    /// Match a report label such as `Hip Angle` or `finger gap`
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let lowered = label.trim().to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_ascii_alphabetic())
            .filter(|w| {
                !w.is_empty()
                    && !matches!(
                        *w,
                        "angle" | "joint" | "flexion" | "degrees" | "deg" | "cm" | "measured"
                    )
            })
            .collect();

        match words.as_slice() {
            ["hip"] => Some(Self::Hip),
            ["knee"] => Some(Self::Knee),
            ["ankle" | "dorsiflexion"] | ["ankle", "dorsiflexion"] => Some(Self::Ankle),
            ["shoulder"] => Some(Self::Shoulder),
            ["elbow"] => Some(Self::Elbow),
            ["finger", "gap"] | ["fingertip" | "fingertips", "gap"] => Some(Self::FingerGap),
            ["wall", "distance"] | ["distance", "to", "wall"] | ["distance", "to", "the", "wall"] => {
                Some(Self::WallDistance)
            }
            _ => None,
        }
    }
}

impl fmt::Display for MeasurementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
