//! Lesson planning for teachers and story drafts for authors.
//!
//! Both are fixed catalogues of choices plus a request that a session
//! checks before recording it. Nothing is generated: an accepted request
//! is stored and confirmed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use thiserror::Error;

use super::dashboard::ClassGroup;

pub const LESSON_MINUTES: RangeInclusive<u16> = 30..=120;

/// Range of the difficulty, comprehension and interactivity sliders.
pub const SETTING_SCALE: RangeInclusive<u8> = 1..=5;

pub const DRAFT_CONFIRMATION: &str = "Story template created! Opening editor...";

// ---------------------------------------------------------------------------
// Lesson planner
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LessonPlanError {
    #[error("lesson duration must be between 30 and 120 minutes, got {0}")]
    Duration(u16),
    #[error("{setting} must be between 1 and 5, got {value}")]
    Setting { setting: &'static str, value: u8 },
    #[error("no class called '{0}'")]
    UnknownClass(String),
    #[error("'{topic}' is not a {subject} topic")]
    UnknownTopic { subject: Subject, topic: String },
    #[error("'{tool}' is not a {subject} tool")]
    UnknownTool { subject: Subject, tool: String },
    #[error("'{level}' is not a {subject} level")]
    UnknownLevel { subject: Subject, level: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Subject {
    English,
    Mathematics,
    Science,
    Biology,
}

impl Subject {
    pub const ALL: [Subject; 4] = [Self::English, Self::Mathematics, Self::Science, Self::Biology];

    pub fn label(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Mathematics => "Mathematics",
            Self::Science => "Science",
            Self::Biology => "Biology",
        }
    }

    pub fn parse(input: &str) -> Option<Subject> {
        match input.trim().to_lowercase().as_str() {
            "english" => Some(Self::English),
            "mathematics" | "maths" | "math" => Some(Self::Mathematics),
            "science" => Some(Self::Science),
            "biology" => Some(Self::Biology),
            _ => None,
        }
    }

    /// What this subject calls its topics on the planner.
    pub fn topic_heading(&self) -> &'static str {
        match self {
            Self::English => "Text type",
            Self::Mathematics | Self::Science => "Topic",
            Self::Biology => "Body system",
        }
    }

    pub fn topics(&self) -> &'static [&'static str] {
        match self {
            Self::English => &["Story", "Poetry", "Non-Fiction", "Drama"],
            Self::Mathematics => &["Algebra", "Geometry", "Statistics", "Calculus"],
            Self::Science => &["States of Matter", "Chemical Reactions", "Forces", "Energy"],
            Self::Biology => &["Respiratory", "Circulatory", "Digestive", "Nervous"],
        }
    }

    pub fn tools(&self) -> &'static [&'static str] {
        match self {
            Self::English => &[
                "Grammar Analysis",
                "Vocabulary Builder",
                "Creative Writing Prompts",
                "Reading Comprehension",
                "Literary Devices",
                "Character Analysis",
            ],
            Self::Mathematics => &[
                "Interactive Graphs",
                "Step-by-Step Solutions",
                "3D Shapes Visualization",
                "Real-world Examples",
                "Formula Breakdown",
                "Practice Problems",
            ],
            Self::Science => &[
                "Molecular Structure Viewer",
                "Chemical Reaction Simulator",
                "Interactive Experiments",
                "Real-time Data Graphs",
                "3D Models",
                "Virtual Lab Setup",
            ],
            Self::Biology => &[
                "3D Anatomy Models",
                "System Animations",
                "Cell Structure Viewer",
                "Process Simulations",
                "Interactive Diagrams",
                "Virtual Dissection",
            ],
        }
    }

    /// The subject's complexity scale, easiest first. Science has none.
    pub fn scale(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            Self::English => Some(("Writing task length", &["Short", "Medium", "Long", "Extended"])),
            Self::Mathematics => Some((
                "Equation complexity",
                &["Basic", "Intermediate", "Advanced", "Challenge"],
            )),
            Self::Science => None,
            Self::Biology => Some(("Detail level", &["Basic", "Intermediate", "Advanced", "Medical"])),
        }
    }

    pub fn confirmation(&self) -> &'static str {
        match self {
            Self::English => "Lesson plan generated! Check the Resources tab to view and modify.",
            Self::Mathematics => "Math lesson materials generated! View in Resources tab.",
            Self::Science => "Science lesson with interactive visualizations generated!",
            Self::Biology => "Biology lesson with interactive models generated!",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyStage {
    Ks1,
    Ks2,
    Ks3,
    Ks4,
}

impl KeyStage {
    pub const ALL: [KeyStage; 4] = [Self::Ks1, Self::Ks2, Self::Ks3, Self::Ks4];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ks1 => "KS1",
            Self::Ks2 => "KS2",
            Self::Ks3 => "KS3",
            Self::Ks4 => "KS4",
        }
    }

    pub fn parse(input: &str) -> Option<KeyStage> {
        let input = input.trim();
        Self::ALL.into_iter().find(|ks| ks.label().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for KeyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One lesson as configured on the planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonPlanRequest {
    pub subject: Subject,
    pub key_stage: KeyStage,
    pub class: String,
    pub difficulty: u8,
    pub comprehension: u8,
    pub duration_minutes: u16,
    pub interactivity: u8,
    pub topic: String,
    pub tools: Vec<String>,
    /// A step on the subject's scale. Must be `None` for Science.
    pub level: Option<String>,
}

impl LessonPlanRequest {
    /// Planner defaults: middle settings, an hour, the first topic and
    /// the easiest level.
    pub fn new(subject: Subject, key_stage: KeyStage, class: impl Into<String>) -> Self {
        Self {
            subject,
            key_stage,
            class: class.into(),
            difficulty: 3,
            comprehension: 3,
            duration_minutes: 60,
            interactivity: 3,
            topic: subject.topics()[0].to_string(),
            tools: Vec::new(),
            level: subject.scale().map(|(_, steps)| steps[0].to_string()),
        }
    }

    /// Check every setting against the catalogue and `classes`.
    pub fn validate(&self, classes: &[ClassGroup]) -> Result<(), LessonPlanError> {
        if !LESSON_MINUTES.contains(&self.duration_minutes) {
            return Err(LessonPlanError::Duration(self.duration_minutes));
        }
        for (setting, value) in [
            ("difficulty", self.difficulty),
            ("comprehension", self.comprehension),
            ("interactivity", self.interactivity),
        ] {
            if !SETTING_SCALE.contains(&value) {
                return Err(LessonPlanError::Setting { setting, value });
            }
        }
        if !classes.iter().any(|c| c.name == self.class) {
            return Err(LessonPlanError::UnknownClass(self.class.clone()));
        }

        let subject = self.subject;
        if !subject.topics().contains(&self.topic.as_str()) {
            return Err(LessonPlanError::UnknownTopic {
                subject,
                topic: self.topic.clone(),
            });
        }
        if let Some(tool) = self.tools.iter().find(|t| !subject.tools().contains(&t.as_str())) {
            return Err(LessonPlanError::UnknownTool {
                subject,
                tool: tool.clone(),
            });
        }
        if let Some(level) = &self.level {
            let known = subject
                .scale()
                .is_some_and(|(_, steps)| steps.contains(&level.as_str()));
            if !known {
                return Err(LessonPlanError::UnknownLevel {
                    subject,
                    level: level.clone(),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Author story drafts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("a new story needs a title")]
    EmptyTitle,
    #[error("'{0}' is listed more than once")]
    RepeatedElement(CustomElement),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Adventure,
    Educational,
    Fantasy,
    Historical,
}

impl Genre {
    pub const ALL: [Genre; 4] = [Self::Adventure, Self::Educational, Self::Fantasy, Self::Historical];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Adventure => "Adventure",
            Self::Educational => "Educational",
            Self::Fantasy => "Fantasy",
            Self::Historical => "Historical",
        }
    }

    pub fn parse(input: &str) -> Option<Genre> {
        let input = input.trim();
        Self::ALL.into_iter().find(|g| g.label().eq_ignore_ascii_case(input))
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeRange {
    FourToSix,
    SevenToNine,
    TenToTwelve,
    ThirteenPlus,
}

impl AgeRange {
    pub const ALL: [AgeRange; 4] = [
        Self::FourToSix,
        Self::SevenToNine,
        Self::TenToTwelve,
        Self::ThirteenPlus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FourToSix => "4-6",
            Self::SevenToNine => "7-9",
            Self::TenToTwelve => "10-12",
            Self::ThirteenPlus => "13+",
        }
    }

    pub fn parse(input: &str) -> Option<AgeRange> {
        let input = input.trim();
        Self::ALL.into_iter().find(|a| a.label() == input)
    }
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parts of a story a reader's answers may personalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomElement {
    CharacterNames,
    Locations,
    PlotElements,
    VisualThemes,
}

impl CustomElement {
    pub const ALL: [CustomElement; 4] = [
        Self::CharacterNames,
        Self::Locations,
        Self::PlotElements,
        Self::VisualThemes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::CharacterNames => "Character Names",
            Self::Locations => "Locations",
            Self::PlotElements => "Plot Elements",
            Self::VisualThemes => "Visual Themes",
        }
    }
}

impl fmt::Display for CustomElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DraftFeatures {
    pub ai_writing_assistant: bool,
    pub interactive_elements: bool,
    pub educational_content: bool,
    pub multi_language: bool,
}

impl DraftFeatures {
    pub fn labelled(&self) -> [(&'static str, bool); 4] {
        [
            ("AI Writing Assistant", self.ai_writing_assistant),
            ("Interactive Elements", self.interactive_elements),
            ("Educational Content", self.educational_content),
            ("Multi-language Support", self.multi_language),
        ]
    }
}

/// A new story as started from the author portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryDraft {
    pub title: String,
    pub genre: Genre,
    pub age_range: AgeRange,
    pub elements: Vec<CustomElement>,
    pub features: DraftFeatures,
}

impl StoryDraft {
    /// A draft personalizing character names, with no extra features.
    pub fn new(title: impl Into<String>, genre: Genre, age_range: AgeRange) -> Self {
        Self {
            title: title.into(),
            genre,
            age_range,
            elements: vec![CustomElement::CharacterNames],
            features: DraftFeatures::default(),
        }
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        for (i, element) in self.elements.iter().enumerate() {
            if self.elements[..i].contains(element) {
                return Err(DraftError::RepeatedElement(*element));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::dashboard::TeacherDashboard;

    fn classes() -> Vec<ClassGroup> {
        TeacherDashboard::sample().classes
    }

    #[test]
    fn default_request_is_valid_for_every_subject() {
        for subject in Subject::ALL {
            let request = LessonPlanRequest::new(subject, KeyStage::Ks2, "Class 7A");
            assert_eq!(request.validate(&classes()), Ok(()), "{subject}");
        }
    }

    #[test]
    fn duration_bounds_are_inclusive() {
        let mut request = LessonPlanRequest::new(Subject::English, KeyStage::Ks1, "Class 8B");
        for (minutes, ok) in [(29, false), (30, true), (120, true), (121, false)] {
            request.duration_minutes = minutes;
            assert_eq!(request.validate(&classes()).is_ok(), ok, "{minutes} minutes");
        }
        request.duration_minutes = 15;
        assert_eq!(
            request.validate(&classes()),
            Err(LessonPlanError::Duration(15))
        );
    }

    #[test]
    fn settings_outside_one_to_five_are_rejected() {
        let mut request = LessonPlanRequest::new(Subject::Science, KeyStage::Ks3, "Class 9C");
        request.interactivity = 0;
        assert_eq!(
            request.validate(&classes()),
            Err(LessonPlanError::Setting {
                setting: "interactivity",
                value: 0
            })
        );
    }

    #[test]
    fn catalogue_entries_belong_to_their_subject() {
        let mut request = LessonPlanRequest::new(Subject::Biology, KeyStage::Ks4, "Class 7A");
        request.topic = "Algebra".to_string();
        assert!(matches!(
            request.validate(&classes()),
            Err(LessonPlanError::UnknownTopic { .. })
        ));

        request.topic = "Nervous".to_string();
        request.tools = vec!["Virtual Dissection".to_string(), "Interactive Graphs".to_string()];
        assert_eq!(
            request.validate(&classes()).unwrap_err().to_string(),
            "'Interactive Graphs' is not a Biology tool"
        );

        request.tools.truncate(1);
        request.level = Some("Medical".to_string());
        assert_eq!(request.validate(&classes()), Ok(()));
    }

    #[test]
    fn science_has_no_level_scale() {
        let mut request = LessonPlanRequest::new(Subject::Science, KeyStage::Ks2, "Class 7A");
        assert_eq!(request.level, None);
        request.level = Some("Basic".to_string());
        assert!(matches!(
            request.validate(&classes()),
            Err(LessonPlanError::UnknownLevel { .. })
        ));
    }

    #[test]
    fn class_must_exist() {
        let request = LessonPlanRequest::new(Subject::English, KeyStage::Ks2, "Class 1Z");
        assert_eq!(
            request.validate(&classes()),
            Err(LessonPlanError::UnknownClass("Class 1Z".to_string()))
        );
    }

    #[test]
    fn key_stage_and_subject_parse() {
        assert_eq!(KeyStage::parse("ks3"), Some(KeyStage::Ks3));
        assert_eq!(KeyStage::parse("KS5"), None);
        assert_eq!(Subject::parse("Maths"), Some(Subject::Mathematics));
    }

    #[test]
    fn draft_needs_a_title() {
        let draft = StoryDraft::new("  ", Genre::Fantasy, AgeRange::SevenToNine);
        assert_eq!(draft.validate(), Err(DraftError::EmptyTitle));
    }

    #[test]
    fn draft_elements_are_distinct() {
        let mut draft = StoryDraft::new("Dragon Picnic", Genre::Fantasy, AgeRange::FourToSix);
        assert_eq!(draft.validate(), Ok(()));
        draft.elements.push(CustomElement::CharacterNames);
        assert_eq!(
            draft.validate(),
            Err(DraftError::RepeatedElement(CustomElement::CharacterNames))
        );
    }

    #[test]
    fn age_range_parses_labels() {
        assert_eq!(AgeRange::parse("13+"), Some(AgeRange::ThirteenPlus));
        assert_eq!(AgeRange::parse("10-12"), Some(AgeRange::TenToTwelve));
        assert_eq!(AgeRange::parse("3-5"), None);
        assert_eq!(Genre::parse("fantasy"), Some(Genre::Fantasy));
    }
}
