//! Typed row schemas for the exporter's five tables.

use super::table::TableRow;

pub(crate) struct ActionRow {
    pub id: u32,
    pub action: String,
}

impl TableRow for ActionRow {
    const COLUMNS: &'static [&'static str] = &["id", "action"];

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        Ok(Self {
            id: parse_id(fields[0])?,
            action: fields[1].to_string(),
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![self.id.to_string(), self.action.clone()]
    }
}

pub(crate) struct StateRow {
    pub id: u32,
    pub scene: String,
    pub name: String,
}

impl TableRow for StateRow {
    const COLUMNS: &'static [&'static str] = &["id", "scene", "name"];

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        Ok(Self {
            id: parse_id(fields[0])?,
            scene: fields[1].to_string(),
            name: fields[2].to_string(),
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![self.id.to_string(), self.scene.clone(), self.name.clone()]
    }
}

pub(crate) struct NodeRow {
    pub id: u32,
    pub scene: String,
    pub location: String,
    pub x: f64,
    pub y: f64,
    pub height: f64,
}

impl TableRow for NodeRow {
    const COLUMNS: &'static [&'static str] = &["id", "scene", "location", "x", "y", "height"];

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        Ok(Self {
            id: parse_id(fields[0])?,
            scene: fields[1].to_string(),
            location: fields[2].to_string(),
            x: parse_number("x", fields[3])?,
            y: parse_number("y", fields[4])?,
            height: parse_number("height", fields[5])?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.scene.clone(),
            self.location.clone(),
            self.x.to_string(),
            self.y.to_string(),
            self.height.to_string(),
        ]
    }
}

pub(crate) struct EdgeRow {
    pub source: u32,
    pub target: u32,
    pub actions: Vec<u32>,
    pub states: Vec<u32>,
    pub scene_change: bool,
    pub real_time: f64,
    pub game_time: f64,
    pub timestamp: f64,
}

impl TableRow for EdgeRow {
    const COLUMNS: &'static [&'static str] = &[
        "source",
        "target",
        "actions",
        "states",
        "scene change",
        "real time",
        "game time",
        "timestamp",
    ];

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        Ok(Self {
            source: parse_id(fields[0])?,
            target: parse_id(fields[1])?,
            actions: parse_id_list(fields[2])?,
            states: parse_id_list(fields[3])?,
            scene_change: fields[4] == "1",
            real_time: parse_number("real time", fields[5])?,
            game_time: parse_number("game time", fields[6])?,
            timestamp: parse_number("timestamp", fields[7])?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![
            self.source.to_string(),
            self.target.to_string(),
            join_ids(&self.actions),
            join_ids(&self.states),
            if self.scene_change { "1" } else { "0" }.to_string(),
            self.real_time.to_string(),
            self.game_time.to_string(),
            self.timestamp.to_string(),
        ]
    }
}

pub(crate) struct IgnoredRow {
    pub source: u32,
    pub target: u32,
}

impl TableRow for IgnoredRow {
    const COLUMNS: &'static [&'static str] = &["source", "target"];

    fn from_fields(fields: &[&str]) -> Result<Self, String> {
        Ok(Self {
            source: parse_id(fields[0])?,
            target: parse_id(fields[1])?,
        })
    }

    fn to_fields(&self) -> Vec<String> {
        vec![self.source.to_string(), self.target.to_string()]
    }
}

fn parse_id(field: &str) -> Result<u32, String> {
    field
        .trim()
        .parse()
        .map_err(|_| format!("invalid id '{field}'"))
}

fn parse_id_list(field: &str) -> Result<Vec<u32>, String> {
    if field.is_empty() {
        return Ok(Vec::new());
    }
    field.split(',').map(parse_id).collect()
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_number(column: &str, field: &str) -> Result<f64, String> {
    field
        .trim()
        .parse()
        .map_err(|_| format!("invalid number '{field}' in column '{column}'"))
}
