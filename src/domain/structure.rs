//! Layout classes carried by the central topic.
//!
//! The tree engine stores the value verbatim and never interprets it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SheetError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StructureClass {
    #[serde(rename = "org.xmind.ui.map.unbalanced")]
    MapUnbalanced,
    #[serde(rename = "org.xmind.ui.map.clockwise")]
    MapClockwise,
    #[serde(rename = "org.xmind.ui.map.anticlockwise")]
    MapAnticlockwise,
    #[default]
    #[serde(rename = "org.xmind.ui.logic.right")]
    LogicRight,
    #[serde(rename = "org.xmind.ui.logic.left")]
    LogicLeft,
    #[serde(rename = "org.xmind.ui.org-chart.down")]
    OrgChartDown,
    #[serde(rename = "org.xmind.ui.org-chart.up")]
    OrgChartUp,
    #[serde(rename = "org.xmind.ui.tree.right")]
    TreeRight,
    #[serde(rename = "org.xmind.ui.tree.left")]
    TreeLeft,
    #[serde(rename = "org.xmind.ui.fishbone.leftHeaded")]
    FishboneLeftHeaded,
    #[serde(rename = "org.xmind.ui.fishbone.rightHeaded")]
    FishboneRightHeaded,
    #[serde(rename = "org.xmind.ui.timeline.horizontal")]
    TimelineHorizontal,
    #[serde(rename = "org.xmind.ui.brace.right")]
    BraceRight,
    #[serde(rename = "org.xmind.ui.spreadsheet")]
    Spreadsheet,
}

impl StructureClass {
    pub const ALL: [StructureClass; 14] = [
        StructureClass::MapUnbalanced,
        StructureClass::MapClockwise,
        StructureClass::MapAnticlockwise,
        StructureClass::LogicRight,
        StructureClass::LogicLeft,
        StructureClass::OrgChartDown,
        StructureClass::OrgChartUp,
        StructureClass::TreeRight,
        StructureClass::TreeLeft,
        StructureClass::FishboneLeftHeaded,
        StructureClass::FishboneRightHeaded,
        StructureClass::TimelineHorizontal,
        StructureClass::BraceRight,
        StructureClass::Spreadsheet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StructureClass::MapUnbalanced => "org.xmind.ui.map.unbalanced",
            StructureClass::MapClockwise => "org.xmind.ui.map.clockwise",
            StructureClass::MapAnticlockwise => "org.xmind.ui.map.anticlockwise",
            StructureClass::LogicRight => "org.xmind.ui.logic.right",
            StructureClass::LogicLeft => "org.xmind.ui.logic.left",
            StructureClass::OrgChartDown => "org.xmind.ui.org-chart.down",
            StructureClass::OrgChartUp => "org.xmind.ui.org-chart.up",
            StructureClass::TreeRight => "org.xmind.ui.tree.right",
            StructureClass::TreeLeft => "org.xmind.ui.tree.left",
            StructureClass::FishboneLeftHeaded => "org.xmind.ui.fishbone.leftHeaded",
            StructureClass::FishboneRightHeaded => "org.xmind.ui.fishbone.rightHeaded",
            StructureClass::TimelineHorizontal => "org.xmind.ui.timeline.horizontal",
            StructureClass::BraceRight => "org.xmind.ui.brace.right",
            StructureClass::Spreadsheet => "org.xmind.ui.spreadsheet",
        }
    }
}

impl fmt::Display for StructureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StructureClass {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| SheetError::UnknownStructureClass(s.to_string()))
    }
}
