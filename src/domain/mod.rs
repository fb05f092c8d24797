// Domain layer: data transfer types shared across the store, the Scryfall
// client and the command surface, plus the port to the image-analysis
// collaborator.

pub mod model;
pub mod ports;
