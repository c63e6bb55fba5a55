// update operator markers
pub const OP_SET: &str = "$set";
pub const OP_UNSET: &str = "$unset";
pub const OP_INC: &str = "$inc";
pub const OP_MIN: &str = "$min";
pub const OP_MAX: &str = "$max";
pub const OP_ADD_TO_SET: &str = "$addToSet";
pub const OP_PUSH: &str = "$push";
pub const OP_PULL: &str = "$pull";
pub const OP_PULL_ALL: &str = "$pullAll";
pub const OP_POP: &str = "$pop";
pub const OP_SET_ON_INSERT: &str = "$setOnInsert";

// update payload modifiers
pub const MOD_EACH: &str = "$each";
pub const MOD_SLICE: &str = "$slice";
pub const MOD_SORT: &str = "$sort";
pub const MOD_POSITION: &str = "$position";

// mapping constants
pub const FIELD_SEPARATOR: char = '.';
pub const TYPE_KEY: &str = "_type";
