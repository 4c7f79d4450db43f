//! Error taxonomy of the renderer.
//!
//! Everything that can go wrong here happens while setting things up: a shader
//! that does not compile, a framebuffer that is incomplete, a scene or image that
//! can not be read. These errors are propagated with `?` to the entry point, which
//! logs them and terminates the process.

pub type Result<T> = ::std::result::Result<T, ::failure::Error>;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "Failed to create shader, errors: \n{}.", _0)]
    ShaderCreation(String),
    #[fail(display = "Surface is incomplete. {}", _0)]
    SurfaceIncomplete(String),
    #[fail(display = "Failed to import scene {:?}: {}.", _0, _1)]
    SceneImport(String, String),
    #[fail(display = "Failed to decode image {:?}: {}.", _0, _1)]
    ImageDecode(String, String),
    #[fail(display = "{} is invalid.", _0)]
    HandleInvalid(String),
    #[fail(display = "Window: {}", _0)]
    Window(String),
    #[fail(display = "Failed to parse settings: {}", _0)]
    Settings(String),
}
