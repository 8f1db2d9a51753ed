//one city's heatmap layer: cells parsed from a GeoJSON FeatureCollection
use crate::cell::Cell;
use crate::classifier::cell_style;
use crate::loader::LoadError;
use crate::selection::ViewSelection;
use geo::{BoundingRect, Geometry, Intersects, Point};
use geojson::{Feature, FeatureCollection, GeoJson};
use rstar::{RTree, RTreeObject, AABB};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct HeatmapCell {
    pub cell: Cell,
    pub geometry: Option<Geometry<f64>>,
    feature: Feature,
}

//bounding box of a cell geometry, pointing back into Heatmap::cells
#[derive(Debug, Clone, PartialEq)]
struct CellEnvelope {
    index: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for CellEnvelope {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

#[derive(Debug, Clone)]
pub struct Heatmap {
    pub cells: Vec<HeatmapCell>,
    tree: RTree<CellEnvelope>,
}

impl Heatmap {
    pub fn from_feature_collection(collection: FeatureCollection) -> Self {
        let mut cells = Vec::with_capacity(collection.features.len());
        for feature in collection.features {
            let properties = feature.properties.clone().unwrap_or_default();
            let cell = match serde_json::from_value::<Cell>(Value::Object(properties)) {
                Ok(cell) => cell,
                Err(e) => {
                    warn!(id = ?feature.id, "skipping heatmap feature without usable properties: {e}");
                    continue;
                }
            };
            let geometry = feature
                .geometry
                .clone()
                .and_then(|g| Geometry::<f64>::try_from(g).ok());
            cells.push(HeatmapCell {
                cell,
                geometry,
                feature,
            });
        }

        let envelopes = cells
            .iter()
            .enumerate()
            .filter_map(|(index, heatmap_cell)| {
                let rect = heatmap_cell.geometry.as_ref()?.bounding_rect()?;
                Some(CellEnvelope {
                    index,
                    envelope: AABB::from_corners(
                        [rect.min().x, rect.min().y],
                        [rect.max().x, rect.max().y],
                    ),
                })
            })
            .collect();

        Self {
            cells,
            tree: RTree::bulk_load(envelopes),
        }
    }

    pub fn from_geojson_str(text: &str) -> Result<Self, LoadError> {
        match text.parse::<GeoJson>()? {
            GeoJson::FeatureCollection(collection) => Ok(Self::from_feature_collection(collection)),
            _ => Err(LoadError::NotAFeatureCollection),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().map(|c| &c.cell)
    }

    pub fn cell(&self, cell_id: i64) -> Option<&HeatmapCell> {
        self.cells.iter().find(|c| c.cell.cell_id == cell_id)
    }

    //cell under a clicked or hovered map position, borders included
    pub fn cell_at(&self, position: Point) -> Option<&HeatmapCell> {
        let probe = AABB::from_point([position.x(), position.y()]);
        let mut candidates: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&probe)
            .map(|e| e.index)
            .collect();
        candidates.sort_unstable();
        candidates
            .into_iter()
            .map(|index| &self.cells[index])
            .find(|c| {
                c.geometry
                    .as_ref()
                    .is_some_and(|geometry| geometry.intersects(&position))
            })
    }

    //the same collection with leaflet style options under properties.style
    pub fn styled(&self, selection: &ViewSelection, selected_cell: Option<i64>) -> FeatureCollection {
        let features = self
            .cells
            .iter()
            .map(|c| {
                let mut feature = c.feature.clone();
                let style = cell_style(&c.cell, selection, selected_cell);
                let style = serde_json::to_value(style).unwrap_or(Value::Null);
                feature
                    .properties
                    .get_or_insert_with(Default::default)
                    .insert("style".to_string(), style);
                feature
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}
