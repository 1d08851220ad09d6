// src/data.rs
//! Plain records passed between the walker, the ranking filter and the exporter.

/// Named slots of a flight, in results-table terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    TakeOffTime,
    PilotName,
    LaunchSite,
    RouteType,
    Distance,
    Points,
    AvgSpeed,
    Glider,
}

/// One results row, before ranking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Flight {
    pub take_off_time: String, // HH:MM
    pub pilot_name: String,
    pub launch_site: String,
    pub route_type: String,
    pub distance: String, // km, as shown
    pub points: String,
    pub avg_speed: String, // km/h, raw cell text
    pub glider: String,
}

impl Flight {
    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::TakeOffTime => &mut self.take_off_time,
            Field::PilotName => &mut self.pilot_name,
            Field::LaunchSite => &mut self.launch_site,
            Field::RouteType => &mut self.route_type,
            Field::Distance => &mut self.distance,
            Field::Points => &mut self.points,
            Field::AvgSpeed => &mut self.avg_speed,
            Field::Glider => &mut self.glider,
        }
    }
}

/// An accepted flight with its contest rank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlightRecord {
    pub rank: u32,
    pub flight: Flight,
}

impl FlightRecord {
    /// Export row, in `EXPORT_HEADERS` order.
    pub fn to_row(&self) -> Vec<String> {
        let f = &self.flight;
        vec![
            self.rank.to_string(),
            f.take_off_time.clone(),
            f.pilot_name.clone(),
            f.launch_site.clone(),
            f.distance.clone(),
            f.route_type.clone(),
            f.points.clone(),
            f.avg_speed.clone(),
            f.glider.clone(),
        ]
    }
}

/// A cup event resolved from the year's event registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventDescriptor {
    pub event_id: u32,
    pub date: String, // YYYY-MM-DD
    pub launch_site: String,
}
