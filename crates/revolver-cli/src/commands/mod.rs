pub mod revolver;
