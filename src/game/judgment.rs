#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JudgeGrade {
    Fantastic,
    Excellent,
    Great,
    Decent,
    WayOff,
    Miss,
}

impl JudgeGrade {
    /// Everything except a miss counts as a hit for HUD purposes.
    #[inline(always)]
    pub const fn is_hit(self) -> bool {
        !matches!(self, Self::Miss)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Judgment {
    pub time_error_ms: f32,
    pub grade: JudgeGrade,
}

impl Judgment {
    pub const fn miss() -> Self {
        Self {
            time_error_ms: 0.0,
            grade: JudgeGrade::Miss,
        }
    }

    pub const fn hit(grade: JudgeGrade, time_error_ms: f32) -> Self {
        Self {
            time_error_ms,
            grade,
        }
    }

    #[inline(always)]
    pub const fn is_hit(&self) -> bool {
        self.grade.is_hit()
    }
}
