pub mod dungeon;
