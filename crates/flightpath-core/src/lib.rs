pub mod error;
pub mod geojson;
pub mod models;
pub mod route_engine;
pub mod routing;
pub mod spatial;
pub mod stitch;
pub mod zones;

pub use error::{GeometryError, Result, RouteError};
pub use geojson::{Feature, FeatureCollection, Geometry};
pub use models::{LngLat, NamedRegion, CLOSE_DISTANCE, MOVE_DISTANCE};
pub use route_engine::{
    find_path, CentralPolicy, HeadingTable, PathSearch, SearchParams, HEADING_COUNT,
    HEADING_INCREMENT_DEG,
};
pub use routing::{
    default_stages, plan_delivery_route, DeliveryRoute, PlannerConfig, StageConfig, StageStats,
    DEFAULT_MAX_EXPANSIONS, DELIVERY_HUB,
};
pub use spatial::{
    bearing_deg, distance, on_segment, orientation, point_in_polygon, segments_intersect,
    BoundingBox, Orientation,
};
pub use stitch::stitch_path;
pub use zones::ExclusionZones;
