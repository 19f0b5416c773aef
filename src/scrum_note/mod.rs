pub mod scrum_note_dto;
pub mod scrum_note_handlers;
pub mod scrum_note_models;
pub mod scrum_note_repository;
pub mod scrum_note_service;
pub mod scrum_note_store;

pub use scrum_note_models::ScrumNote;
pub use scrum_note_repository::ScrumNoteRepository;
pub use scrum_note_service::ScrumNoteService;
pub use scrum_note_store::ScrumNoteStore;
