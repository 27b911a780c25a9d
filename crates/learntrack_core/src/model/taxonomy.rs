//! Competency taxonomy registry.
//!
//! # Responsibility
//! - Define the closed dimension -> sub-dimension -> indicator hierarchy.
//! - Resolve wire keys (`learningAbility`, `oneStar`, ...) to typed keys.
//! - Provide display labels for every node.
//!
//! # Invariants
//! - The taxonomy is immutable and has no runtime registration.
//! - Keys are unique across all three levels.
//! - `IndicatorKey::ALL` is grouped by sub-dimension in taxonomy order, so an
//!   indicator's ordinal doubles as its storage slot.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of indicators across the whole taxonomy.
pub const INDICATOR_COUNT: usize = 44;

/// Number of sub-dimensions across the whole taxonomy.
pub const SUB_DIMENSION_COUNT: usize = 13;

/// Lookup failure against the closed taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaxonomyError {
    /// Key is not part of the taxonomy at the requested level.
    UnknownKey(String),
    /// Key exists but does not belong to the given parent.
    MisplacedKey { parent: String, key: String },
}

impl Display for TaxonomyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownKey(key) => write!(f, "unknown taxonomy key: `{key}`"),
            Self::MisplacedKey { parent, key } => {
                write!(f, "taxonomy key `{key}` does not belong to `{parent}`")
            }
        }
    }
}

impl Error for TaxonomyError {}

/// Top-level competency dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DimensionKey {
    LearningAbility,
    TimeEfficiency,
    LearningHabits,
    ExecutionAbility,
}

/// Second-level grouping of indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubDimensionKey {
    ProblemMastery,
    SelfLearning,
    ThinkingAbility,
    MetaLearning,
    ProblemSolvingEfficiency,
    MistakeOvercomingEfficiency,
    AttentionManagement,
    ProactiveHabits,
    ToolUseHabits,
    SystematicLearning,
    TaskExecution,
    CoachInteraction,
    MentalityManagement,
}

/// Leaf metric rated on the 1..=5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndicatorKey {
    OneStar,
    TwoStar,
    ThreeStar,
    FourStar,
    OneStarSimilar,
    TwoStarSimilar,
    ThreeStarSimilar,
    FourStarSimilar,
    SelfUnderstandingRatio,
    ExplainToCoachRatio,
    InitiativeWhenFacingDifficulties,
    StructuredThinking,
    SelfBottleneckIdentification,
    KnowledgeTransfer,
    ProblemDescriptionAccuracy,
    AiToolUtilization,
    SelfReflection,
    OneStarTimeEfficiency,
    TwoStarTimeEfficiency,
    ThreeStarTimeEfficiency,
    FourStarTimeEfficiency,
    SelfLearningSpeed,
    PomodoroEfficiency,
    FocusDuration,
    DistractionHandling,
    GoalClarity,
    ActiveQuestioning,
    DualNoteMethod,
    ReviewHabits,
    AiToolQuestioning,
    PomodoroUse,
    MistakeCollection,
    KnowledgeIntegration,
    KeyPointAwareness,
    SelfTesting,
    TaskCompletionRate,
    TaskQuality,
    TaskInitiative,
    ProactiveCommunication,
    FeedbackReceptivity,
    GuidanceImplementation,
    PositivityTowardsChallenges,
    FrustrationHandling,
    MotivationSustainability,
}

struct DimensionRow {
    key: &'static str,
    label: &'static str,
    sub_dimensions: &'static [SubDimensionKey],
}

struct SubDimensionRow {
    key: &'static str,
    label: &'static str,
    dimension: DimensionKey,
    indicators: &'static [IndicatorKey],
}

struct IndicatorRow {
    key: &'static str,
    label: &'static str,
    sub_dimension: SubDimensionKey,
}

// Rows are indexed by enum discriminant; order must match the enum declarations.
const DIMENSIONS: [DimensionRow; 4] = [
    DimensionRow {
        key: "learningAbility",
        label: "学习能力",
        sub_dimensions: &[
            SubDimensionKey::ProblemMastery,
            SubDimensionKey::SelfLearning,
            SubDimensionKey::ThinkingAbility,
            SubDimensionKey::MetaLearning,
        ],
    },
    DimensionRow {
        key: "timeEfficiency",
        label: "时间利用效率",
        sub_dimensions: &[
            SubDimensionKey::ProblemSolvingEfficiency,
            SubDimensionKey::MistakeOvercomingEfficiency,
            SubDimensionKey::AttentionManagement,
        ],
    },
    DimensionRow {
        key: "learningHabits",
        label: "学习习惯",
        sub_dimensions: &[
            SubDimensionKey::ProactiveHabits,
            SubDimensionKey::ToolUseHabits,
            SubDimensionKey::SystematicLearning,
        ],
    },
    DimensionRow {
        key: "executionAbility",
        label: "配合执行力",
        sub_dimensions: &[
            SubDimensionKey::TaskExecution,
            SubDimensionKey::CoachInteraction,
            SubDimensionKey::MentalityManagement,
        ],
    },
];

const SUB_DIMENSIONS: [SubDimensionRow; SUB_DIMENSION_COUNT] = [
    SubDimensionRow {
        key: "problemMastery",
        label: "题目掌握度",
        dimension: DimensionKey::LearningAbility,
        indicators: &[
            IndicatorKey::OneStar,
            IndicatorKey::TwoStar,
            IndicatorKey::ThreeStar,
            IndicatorKey::FourStar,
            IndicatorKey::OneStarSimilar,
            IndicatorKey::TwoStarSimilar,
            IndicatorKey::ThreeStarSimilar,
            IndicatorKey::FourStarSimilar,
        ],
    },
    SubDimensionRow {
        key: "selfLearning",
        label: "错题自学能力",
        dimension: DimensionKey::LearningAbility,
        indicators: &[
            IndicatorKey::SelfUnderstandingRatio,
            IndicatorKey::ExplainToCoachRatio,
            IndicatorKey::InitiativeWhenFacingDifficulties,
        ],
    },
    SubDimensionRow {
        key: "thinkingAbility",
        label: "思维能力",
        dimension: DimensionKey::LearningAbility,
        indicators: &[
            IndicatorKey::StructuredThinking,
            IndicatorKey::SelfBottleneckIdentification,
            IndicatorKey::KnowledgeTransfer,
        ],
    },
    SubDimensionRow {
        key: "metaLearning",
        label: "学习元能力",
        dimension: DimensionKey::LearningAbility,
        indicators: &[
            IndicatorKey::ProblemDescriptionAccuracy,
            IndicatorKey::AiToolUtilization,
            IndicatorKey::SelfReflection,
        ],
    },
    SubDimensionRow {
        key: "problemSolvingEfficiency",
        label: "做题效率",
        dimension: DimensionKey::TimeEfficiency,
        indicators: &[
            IndicatorKey::OneStarTimeEfficiency,
            IndicatorKey::TwoStarTimeEfficiency,
            IndicatorKey::ThreeStarTimeEfficiency,
            IndicatorKey::FourStarTimeEfficiency,
        ],
    },
    SubDimensionRow {
        key: "mistakeOvercomingEfficiency",
        label: "错题攻克效率",
        dimension: DimensionKey::TimeEfficiency,
        indicators: &[
            IndicatorKey::SelfLearningSpeed,
            IndicatorKey::PomodoroEfficiency,
        ],
    },
    SubDimensionRow {
        key: "attentionManagement",
        label: "注意力管理",
        dimension: DimensionKey::TimeEfficiency,
        indicators: &[
            IndicatorKey::FocusDuration,
            IndicatorKey::DistractionHandling,
            IndicatorKey::GoalClarity,
        ],
    },
    SubDimensionRow {
        key: "proactiveHabits",
        label: "主动学习习惯",
        dimension: DimensionKey::LearningHabits,
        indicators: &[
            IndicatorKey::ActiveQuestioning,
            IndicatorKey::DualNoteMethod,
            IndicatorKey::ReviewHabits,
        ],
    },
    SubDimensionRow {
        key: "toolUseHabits",
        label: "工具使用习惯",
        dimension: DimensionKey::LearningHabits,
        indicators: &[
            IndicatorKey::AiToolQuestioning,
            IndicatorKey::PomodoroUse,
            IndicatorKey::MistakeCollection,
        ],
    },
    SubDimensionRow {
        key: "systematicLearning",
        label: "学习系统性",
        dimension: DimensionKey::LearningHabits,
        indicators: &[
            IndicatorKey::KnowledgeIntegration,
            IndicatorKey::KeyPointAwareness,
            IndicatorKey::SelfTesting,
        ],
    },
    SubDimensionRow {
        key: "taskExecution",
        label: "任务执行",
        dimension: DimensionKey::ExecutionAbility,
        indicators: &[
            IndicatorKey::TaskCompletionRate,
            IndicatorKey::TaskQuality,
            IndicatorKey::TaskInitiative,
        ],
    },
    SubDimensionRow {
        key: "coachInteraction",
        label: "教练互动",
        dimension: DimensionKey::ExecutionAbility,
        indicators: &[
            IndicatorKey::ProactiveCommunication,
            IndicatorKey::FeedbackReceptivity,
            IndicatorKey::GuidanceImplementation,
        ],
    },
    SubDimensionRow {
        key: "mentalityManagement",
        label: "心态管理",
        dimension: DimensionKey::ExecutionAbility,
        indicators: &[
            IndicatorKey::PositivityTowardsChallenges,
            IndicatorKey::FrustrationHandling,
            IndicatorKey::MotivationSustainability,
        ],
    },
];

const fn indicator(
    key: &'static str,
    label: &'static str,
    sub_dimension: SubDimensionKey,
) -> IndicatorRow {
    IndicatorRow {
        key,
        label,
        sub_dimension,
    }
}

const INDICATORS: [IndicatorRow; INDICATOR_COUNT] = {
    use SubDimensionKey as S;
    [
        indicator("oneStar", "1⭐题正确率", S::ProblemMastery),
        indicator("twoStar", "2⭐题正确率", S::ProblemMastery),
        indicator("threeStar", "3⭐题正确率", S::ProblemMastery),
        indicator("fourStar", "4⭐题正确率", S::ProblemMastery),
        indicator("oneStarSimilar", "1⭐相似题正确率", S::ProblemMastery),
        indicator("twoStarSimilar", "2⭐相似题正确率", S::ProblemMastery),
        indicator("threeStarSimilar", "3⭐相似题正确率", S::ProblemMastery),
        indicator("fourStarSimilar", "4⭐相似题正确率", S::ProblemMastery),
        indicator("selfUnderstandingRatio", "自学理解比例", S::SelfLearning),
        indicator("explainToCoachRatio", "能向教练清晰讲解比例", S::SelfLearning),
        indicator(
            "initiativeWhenFacingDifficulties",
            "遇到困难主动寻求解决的积极性",
            S::SelfLearning,
        ),
        indicator("structuredThinking", "解题思路结构化能力", S::ThinkingAbility),
        indicator(
            "selfBottleneckIdentification",
            "自我卡点定位能力",
            S::ThinkingAbility,
        ),
        indicator("knowledgeTransfer", "知识点联系与迁移能力", S::ThinkingAbility),
        indicator("problemDescriptionAccuracy", "问题精确描述能力", S::MetaLearning),
        indicator("aiToolUtilization", "AI工具有效利用能力", S::MetaLearning),
        indicator("selfReflection", "自我反思总结能力", S::MetaLearning),
        indicator(
            "oneStarTimeEfficiency",
            "1⭐题平均完成时间效率",
            S::ProblemSolvingEfficiency,
        ),
        indicator(
            "twoStarTimeEfficiency",
            "2⭐题平均完成时间效率",
            S::ProblemSolvingEfficiency,
        ),
        indicator(
            "threeStarTimeEfficiency",
            "3⭐题平均完成时间效率",
            S::ProblemSolvingEfficiency,
        ),
        indicator(
            "fourStarTimeEfficiency",
            "4⭐题平均完成时间效率",
            S::ProblemSolvingEfficiency,
        ),
        indicator(
            "selfLearningSpeed",
            "错题自学理解速度",
            S::MistakeOvercomingEfficiency,
        ),
        indicator(
            "pomodoroEfficiency",
            "番茄钟利用效率",
            S::MistakeOvercomingEfficiency,
        ),
        indicator("focusDuration", "专注持续时间", S::AttentionManagement),
        indicator(
            "distractionHandling",
            "学习过程中干扰应对能力",
            S::AttentionManagement,
        ),
        indicator("goalClarity", "目标明确度", S::AttentionManagement),
        indicator("activeQuestioning", "主动提问解决问题习惯", S::ProactiveHabits),
        indicator(
            "dualNoteMethod",
            "使用双格笔记法记录知识点和困惑的习惯",
            S::ProactiveHabits,
        ),
        indicator("reviewHabits", "课前预习/课后复习习惯", S::ProactiveHabits),
        indicator("aiToolQuestioning", "AI工具有效提问习惯", S::ToolUseHabits),
        indicator("pomodoroUse", "合理运用番茄钟习惯", S::ToolUseHabits),
        indicator("mistakeCollection", "错题收集整理习惯", S::ToolUseHabits),
        indicator(
            "knowledgeIntegration",
            "知识整合与复习习惯",
            S::SystematicLearning,
        ),
        indicator("keyPointAwareness", "考点关联意识习惯", S::SystematicLearning),
        indicator("selfTesting", "自我检验习惯", S::SystematicLearning),
        indicator("taskCompletionRate", "任务完成度", S::TaskExecution),
        indicator("taskQuality", "任务质量", S::TaskExecution),
        indicator("taskInitiative", "任务主动性", S::TaskExecution),
        indicator("proactiveCommunication", "主动沟通频率", S::CoachInteraction),
        indicator("feedbackReceptivity", "反馈接受度", S::CoachInteraction),
        indicator("guidanceImplementation", "指导落实度", S::CoachInteraction),
        indicator(
            "positivityTowardsChallenges",
            "面对挑战积极性",
            S::MentalityManagement,
        ),
        indicator("frustrationHandling", "挫折应对能力", S::MentalityManagement),
        indicator(
            "motivationSustainability",
            "学习动力持续性",
            S::MentalityManagement,
        ),
    ]
};

impl DimensionKey {
    pub const ALL: [DimensionKey; 4] = [
        DimensionKey::LearningAbility,
        DimensionKey::TimeEfficiency,
        DimensionKey::LearningHabits,
        DimensionKey::ExecutionAbility,
    ];

    fn row(self) -> &'static DimensionRow {
        &DIMENSIONS[self as usize]
    }

    /// Wire key, e.g. `learningAbility`.
    pub fn key(self) -> &'static str {
        self.row().key
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        self.row().label
    }

    /// Ordered sub-dimensions of this dimension.
    pub fn sub_dimensions(self) -> &'static [SubDimensionKey] {
        self.row().sub_dimensions
    }

    /// Iterates every indicator of this dimension in taxonomy order.
    pub fn indicators(self) -> impl Iterator<Item = IndicatorKey> {
        self.sub_dimensions()
            .iter()
            .flat_map(|sub_dimension| sub_dimension.indicators().iter().copied())
    }

    /// Resolves a wire key at dimension level.
    pub fn parse(key: &str) -> Result<Self, TaxonomyError> {
        match Taxonomy::global().lookup(key)? {
            TaxonomyNode::Dimension(dimension) => Ok(dimension),
            _ => Err(TaxonomyError::UnknownKey(key.to_string())),
        }
    }
}

impl SubDimensionKey {
    pub const ALL: [SubDimensionKey; SUB_DIMENSION_COUNT] = [
        SubDimensionKey::ProblemMastery,
        SubDimensionKey::SelfLearning,
        SubDimensionKey::ThinkingAbility,
        SubDimensionKey::MetaLearning,
        SubDimensionKey::ProblemSolvingEfficiency,
        SubDimensionKey::MistakeOvercomingEfficiency,
        SubDimensionKey::AttentionManagement,
        SubDimensionKey::ProactiveHabits,
        SubDimensionKey::ToolUseHabits,
        SubDimensionKey::SystematicLearning,
        SubDimensionKey::TaskExecution,
        SubDimensionKey::CoachInteraction,
        SubDimensionKey::MentalityManagement,
    ];

    fn row(self) -> &'static SubDimensionRow {
        &SUB_DIMENSIONS[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.row().key
    }

    pub fn label(self) -> &'static str {
        self.row().label
    }

    /// Owning dimension.
    pub fn dimension(self) -> DimensionKey {
        self.row().dimension
    }

    /// Ordered indicators of this sub-dimension.
    pub fn indicators(self) -> &'static [IndicatorKey] {
        self.row().indicators
    }

    /// Resolves a wire key at sub-dimension level.
    pub fn parse(key: &str) -> Result<Self, TaxonomyError> {
        match Taxonomy::global().lookup(key)? {
            TaxonomyNode::SubDimension(sub_dimension) => Ok(sub_dimension),
            _ => Err(TaxonomyError::UnknownKey(key.to_string())),
        }
    }

    /// 1-based step of this sub-dimension in a full walk of the taxonomy.
    pub fn position(self) -> usize {
        self as usize + 1
    }

    /// Next sub-dimension in taxonomy order, crossing dimension boundaries.
    ///
    /// Returns `None` on the last sub-dimension.
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self as usize + 1).copied()
    }

    /// Previous sub-dimension in taxonomy order, crossing dimension boundaries.
    pub fn previous(self) -> Option<Self> {
        (self as usize).checked_sub(1).map(|index| Self::ALL[index])
    }
}

impl IndicatorKey {
    pub const ALL: [IndicatorKey; INDICATOR_COUNT] = {
        use IndicatorKey::*;
        [
            OneStar,
            TwoStar,
            ThreeStar,
            FourStar,
            OneStarSimilar,
            TwoStarSimilar,
            ThreeStarSimilar,
            FourStarSimilar,
            SelfUnderstandingRatio,
            ExplainToCoachRatio,
            InitiativeWhenFacingDifficulties,
            StructuredThinking,
            SelfBottleneckIdentification,
            KnowledgeTransfer,
            ProblemDescriptionAccuracy,
            AiToolUtilization,
            SelfReflection,
            OneStarTimeEfficiency,
            TwoStarTimeEfficiency,
            ThreeStarTimeEfficiency,
            FourStarTimeEfficiency,
            SelfLearningSpeed,
            PomodoroEfficiency,
            FocusDuration,
            DistractionHandling,
            GoalClarity,
            ActiveQuestioning,
            DualNoteMethod,
            ReviewHabits,
            AiToolQuestioning,
            PomodoroUse,
            MistakeCollection,
            KnowledgeIntegration,
            KeyPointAwareness,
            SelfTesting,
            TaskCompletionRate,
            TaskQuality,
            TaskInitiative,
            ProactiveCommunication,
            FeedbackReceptivity,
            GuidanceImplementation,
            PositivityTowardsChallenges,
            FrustrationHandling,
            MotivationSustainability,
        ]
    };

    fn row(self) -> &'static IndicatorRow {
        &INDICATORS[self as usize]
    }

    /// Storage slot of this indicator in a flat score array.
    pub(crate) fn slot(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        self.row().key
    }

    pub fn label(self) -> &'static str {
        self.row().label
    }

    /// Owning sub-dimension.
    pub fn sub_dimension(self) -> SubDimensionKey {
        self.row().sub_dimension
    }

    /// Owning dimension.
    pub fn dimension(self) -> DimensionKey {
        self.sub_dimension().dimension()
    }

    /// Resolves a wire key at indicator level.
    pub fn parse(key: &str) -> Result<Self, TaxonomyError> {
        match Taxonomy::global().lookup(key)? {
            TaxonomyNode::Indicator(indicator) => Ok(indicator),
            _ => Err(TaxonomyError::UnknownKey(key.to_string())),
        }
    }
}

impl Display for DimensionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl Display for SubDimensionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl Display for IndicatorKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A resolved node of any taxonomy level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonomyNode {
    Dimension(DimensionKey),
    SubDimension(SubDimensionKey),
    Indicator(IndicatorKey),
}

impl TaxonomyNode {
    pub fn key(self) -> &'static str {
        match self {
            Self::Dimension(dimension) => dimension.key(),
            Self::SubDimension(sub_dimension) => sub_dimension.key(),
            Self::Indicator(indicator) => indicator.key(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dimension(dimension) => dimension.label(),
            Self::SubDimension(sub_dimension) => sub_dimension.label(),
            Self::Indicator(indicator) => indicator.label(),
        }
    }
}

static TAXONOMY: Lazy<Taxonomy> = Lazy::new(Taxonomy::build);

/// String-keyed view over the closed taxonomy.
///
/// Loaded once per process and never mutated.
pub struct Taxonomy {
    by_key: HashMap<&'static str, TaxonomyNode>,
}

impl Taxonomy {
    /// Returns the process-wide registry.
    pub fn global() -> &'static Taxonomy {
        &TAXONOMY
    }

    fn build() -> Self {
        let nodes = DimensionKey::ALL
            .into_iter()
            .map(TaxonomyNode::Dimension)
            .chain(SubDimensionKey::ALL.into_iter().map(TaxonomyNode::SubDimension))
            .chain(IndicatorKey::ALL.into_iter().map(TaxonomyNode::Indicator));

        Self {
            by_key: nodes.map(|node| (node.key(), node)).collect(),
        }
    }

    /// Resolves a key at any level.
    pub fn lookup(&self, key: &str) -> Result<TaxonomyNode, TaxonomyError> {
        self.by_key
            .get(key)
            .copied()
            .ok_or_else(|| TaxonomyError::UnknownKey(key.to_string()))
    }

    /// Ordered sub-dimensions of a dimension key.
    pub fn sub_dimensions_of(
        &self,
        dimension_key: &str,
    ) -> Result<&'static [SubDimensionKey], TaxonomyError> {
        match self.lookup(dimension_key)? {
            TaxonomyNode::Dimension(dimension) => Ok(dimension.sub_dimensions()),
            _ => Err(TaxonomyError::UnknownKey(dimension_key.to_string())),
        }
    }

    /// Ordered indicators of a sub-dimension key.
    pub fn indicators_of(
        &self,
        sub_dimension_key: &str,
    ) -> Result<&'static [IndicatorKey], TaxonomyError> {
        match self.lookup(sub_dimension_key)? {
            TaxonomyNode::SubDimension(sub_dimension) => Ok(sub_dimension.indicators()),
            _ => Err(TaxonomyError::UnknownKey(sub_dimension_key.to_string())),
        }
    }

    /// Display label for a key at any level.
    pub fn label_of(&self, key: &str) -> Result<&'static str, TaxonomyError> {
        self.lookup(key).map(TaxonomyNode::label)
    }

    /// Resolves a full `dimension / sub-dimension / indicator` path.
    ///
    /// # Errors
    /// - `UnknownKey` when any segment is not a key of its level.
    /// - `MisplacedKey` when a segment does not belong to its parent.
    pub fn resolve_path(
        &self,
        dimension_key: &str,
        sub_dimension_key: &str,
        indicator_key: &str,
    ) -> Result<IndicatorKey, TaxonomyError> {
        let dimension = DimensionKey::parse(dimension_key)?;
        let sub_dimension = SubDimensionKey::parse(sub_dimension_key)?;
        let indicator = IndicatorKey::parse(indicator_key)?;

        if sub_dimension.dimension() != dimension {
            return Err(TaxonomyError::MisplacedKey {
                parent: dimension_key.to_string(),
                key: sub_dimension_key.to_string(),
            });
        }
        if indicator.sub_dimension() != sub_dimension {
            return Err(TaxonomyError::MisplacedKey {
                parent: sub_dimension_key.to_string(),
                key: indicator_key.to_string(),
            });
        }

        Ok(indicator)
    }
}
