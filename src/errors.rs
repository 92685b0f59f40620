use crate::grid::CellLinkError;

error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Json(::serde_json::Error);
        Base64(::base64::DecodeError);
        Utf8(::std::string::FromUtf8Error);
        Image(::image::ImageError);
    }

    errors {
        InvalidAlgorithm(name: String) {
            description("no maze algorithm registered")
            display("no maze algorithm registered for '{}'", name)
        }
        EmptyGrid {
            description("grid has no cells")
            display("cannot carve a maze in a grid with no cells")
        }
        CellLink(err: CellLinkError) {
            description("invalid cell link")
            display("invalid cell link: {:?}", err)
        }
        GridTooLarge(rows: usize, columns: usize) {
            description("grid has too many cells")
            display("a {}x{} grid has more cells than a node index can address", rows, columns)
        }
        PixelBufferSize(width: u32, height: u32) {
            description("pixel buffer does not match the image dimensions")
            display("pixel buffer does not fit a {}x{} image", width, height)
        }
    }
}

impl From<CellLinkError> for Error {
    fn from(err: CellLinkError) -> Error {
        ErrorKind::CellLink(err).into()
    }
}
