pub mod roster;

pub use roster::InMemoryRosterRepository;
