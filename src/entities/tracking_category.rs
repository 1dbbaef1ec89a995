use crate::model::EntityKind;

pub static KIND: EntityKind = EntityKind::collection(
    "TrackingCategories",
    "TrackingCategory",
    "TrackingCategoryID",
    &["Name", "Options"],
);

entity! {
    TrackingCategory => KIND
}

impl TrackingCategory {
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str("Name")
    }
}
