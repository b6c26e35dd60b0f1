mod auth_form;
pub use auth_form::AuthForm;

mod shell;
pub use shell::Shell;

mod home;
pub use home::Home;

mod topic;
pub use topic::{AiFundamentals, BusinessAi, Productivity, TopicPage};

mod submit_interest;
pub use submit_interest::SubmitInterest;

mod profile;
pub use profile::Profile;

mod hello;
pub use hello::Hello;

mod not_found;
pub use not_found::NotFound;

mod loading;
pub use loading::LoadingScreen;
