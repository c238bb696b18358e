// ABOUTME: Exercise catalog models shared by program slots and program details
// ABOUTME: Catalog rows are owned by the catalog; programs only reference them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Catalog id
    pub exercise_id: i64,
    /// Movement name
    pub name: String,
    /// Long description
    pub description: Option<String>,
    /// Coaching cues
    pub cues: Option<String>,
    /// Demonstration video
    pub video_url: Option<String>,
    /// Demonstration image
    pub image_url: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Exercise {
    /// Static metadata block embedded in program details
    #[must_use]
    pub fn meta(&self) -> ExerciseMeta {
        ExerciseMeta {
            description: self.description.clone(),
            cues: self.cues.clone(),
            video_url: self.video_url.clone(),
            image_url: self.image_url.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Static exercise metadata shown next to a slot in program details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseMeta {
    /// Long description
    pub description: Option<String>,
    /// Coaching cues
    pub cues: Option<String>,
    /// Demonstration video
    pub video_url: Option<String>,
    /// Demonstration image
    pub image_url: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}
