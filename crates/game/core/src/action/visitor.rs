use crate::state::{CoordsXY, CoordsXYZD, TileElement};

/// Receives an action's parameters for introspection tooling.
///
/// Actions visit the same fields, under the same names and in the same order,
/// as they stream in [`serialise_parameters`](super::GameAction::serialise_parameters).
pub trait ParameterVisitor {
    fn visit_int(&mut self, name: &'static str, value: i64);

    fn visit_coords_xy(&mut self, name: &'static str, value: CoordsXY);

    fn visit_coords_xyzd(&mut self, name: &'static str, value: CoordsXYZD);

    fn visit_element(&mut self, name: &'static str, value: &TileElement);
}

/// Visitor that records parameter names and rendered values in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterList {
    pub fields: Vec<(&'static str, String)>,
}

impl ParameterList {
    pub fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|(name, _)| *name).collect()
    }
}

impl ParameterVisitor for ParameterList {
    fn visit_int(&mut self, name: &'static str, value: i64) {
        self.fields.push((name, value.to_string()));
    }

    fn visit_coords_xy(&mut self, name: &'static str, value: CoordsXY) {
        self.fields.push((name, value.to_string()));
    }

    fn visit_coords_xyzd(&mut self, name: &'static str, value: CoordsXYZD) {
        self.fields.push((name, value.to_string()));
    }

    fn visit_element(&mut self, name: &'static str, value: &TileElement) {
        self.fields.push((name, hex::encode(value.to_raw())));
    }
}
