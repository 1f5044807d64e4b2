use chrono::{Duration, Utc};

use crate::models::domain::{Attempt, ClassConfig, StudentProfile};
