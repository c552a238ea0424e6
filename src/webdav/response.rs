use tracing::{debug, warn, Level};

use super::error::{DavError, DavResult};
use super::request::OperationKind;

/// Successful outcome of a WebDAV operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DavOutcome {
    /// Body of a GET
    Body(Vec<u8>),
    Created,
    /// PUT replaced an existing resource
    Updated,
    Moved,
    Copied,
    Deleted,
}

impl DavOutcome {
    /// Body bytes of a GET outcome
    pub fn into_body(self) -> Option<Vec<u8>> {
        match self {
            DavOutcome::Body(bytes) => Some(bytes),
            _ => None,
        }
    }
}

/// Maps a response status to the outcome for `kind`.
///
/// Never fails to produce a value: any status not listed for an operation
/// becomes [`DavError::Unknown`] with the raw code.
pub fn interpret(kind: OperationKind, status: u16, body: Vec<u8>) -> DavResult<DavOutcome> {
    let result = match kind {
        OperationKind::Get => match status {
            200 => Ok(DavOutcome::Body(body)),
            404 => Err(DavError::NotFound),
            401 | 403 => Err(DavError::Forbidden),
            other => Err(DavError::Unknown(other)),
        },
        OperationKind::Put => match status {
            201 => Ok(DavOutcome::Created),
            204 => Ok(DavOutcome::Updated),
            403 => Err(DavError::Forbidden),
            409 => Err(DavError::Conflict),
            other => Err(DavError::Unknown(other)),
        },
        OperationKind::Move | OperationKind::Copy => match status {
            201 => Ok(DavOutcome::Created),
            204 if kind == OperationKind::Move => Ok(DavOutcome::Moved),
            204 => Ok(DavOutcome::Copied),
            403 => Err(DavError::Forbidden),
            404 => Err(DavError::NotFound),
            409 => Err(DavError::Conflict),
            412 => Err(DavError::PreconditionFailed),
            other => Err(DavError::Unknown(other)),
        },
        OperationKind::Delete => match status {
            200 | 204 => Ok(DavOutcome::Deleted),
            404 => Err(DavError::NotFound),
            403 => Err(DavError::Forbidden),
            other => Err(DavError::Unknown(other)),
        },
        OperationKind::Mkcol => match status {
            201 => Ok(DavOutcome::Created),
            405 => Err(DavError::MethodNotAllowed),
            409 => Err(DavError::Conflict),
            403 => Err(DavError::Forbidden),
            other => Err(DavError::Unknown(other)),
        },
    };

    if let Err(ref e) = result {
        if failure_level(kind, e) == Level::DEBUG {
            debug!("{} answered with HTTP {}: {}", kind, status, e);
        } else {
            warn!("{} answered with HTTP {}: {}", kind, status, e);
        }
    }

    result
}

// MKCOL on an existing collection is routine during a recursive walk.
fn failure_level(kind: OperationKind, error: &DavError) -> Level {
    match (kind, error) {
        (OperationKind::Mkcol, DavError::MethodNotAllowed) => Level::DEBUG,
        _ => Level::WARN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(kind: OperationKind, code: u16) -> DavResult<DavOutcome> {
        interpret(kind, code, Vec::new())
    }

    #[test]
    fn test_get_mapping() {
        assert_eq!(
            interpret(OperationKind::Get, 200, b"payload".to_vec()),
            Ok(DavOutcome::Body(b"payload".to_vec()))
        );
        assert_eq!(status(OperationKind::Get, 404), Err(DavError::NotFound));
        assert_eq!(status(OperationKind::Get, 401), Err(DavError::Forbidden));
        assert_eq!(status(OperationKind::Get, 403), Err(DavError::Forbidden));
        assert_eq!(status(OperationKind::Get, 418), Err(DavError::Unknown(418)));
        // Only 200 carries a body for GET
        assert_eq!(status(OperationKind::Get, 206), Err(DavError::Unknown(206)));
    }

    #[test]
    fn test_put_mapping() {
        assert_eq!(status(OperationKind::Put, 201), Ok(DavOutcome::Created));
        assert_eq!(status(OperationKind::Put, 204), Ok(DavOutcome::Updated));
        assert_eq!(status(OperationKind::Put, 403), Err(DavError::Forbidden));
        assert_eq!(status(OperationKind::Put, 409), Err(DavError::Conflict));
        assert_eq!(status(OperationKind::Put, 200), Err(DavError::Unknown(200)));
    }

    #[test]
    fn test_move_and_copy_mapping() {
        assert_eq!(status(OperationKind::Move, 201), Ok(DavOutcome::Created));
        assert_eq!(status(OperationKind::Move, 204), Ok(DavOutcome::Moved));
        assert_eq!(status(OperationKind::Copy, 201), Ok(DavOutcome::Created));
        assert_eq!(status(OperationKind::Copy, 204), Ok(DavOutcome::Copied));

        for kind in [OperationKind::Move, OperationKind::Copy] {
            assert_eq!(status(kind, 403), Err(DavError::Forbidden));
            assert_eq!(status(kind, 404), Err(DavError::NotFound));
            assert_eq!(status(kind, 409), Err(DavError::Conflict));
            assert_eq!(status(kind, 412), Err(DavError::PreconditionFailed));
            assert_eq!(status(kind, 502), Err(DavError::Unknown(502)));
        }
    }

    #[test]
    fn test_delete_mapping() {
        assert_eq!(status(OperationKind::Delete, 200), Ok(DavOutcome::Deleted));
        assert_eq!(status(OperationKind::Delete, 204), Ok(DavOutcome::Deleted));
        assert_eq!(status(OperationKind::Delete, 404), Err(DavError::NotFound));
        assert_eq!(status(OperationKind::Delete, 403), Err(DavError::Forbidden));
        assert_eq!(status(OperationKind::Delete, 207), Err(DavError::Unknown(207)));
    }

    #[test]
    fn test_mkcol_mapping() {
        assert_eq!(status(OperationKind::Mkcol, 201), Ok(DavOutcome::Created));
        assert_eq!(status(OperationKind::Mkcol, 405), Err(DavError::MethodNotAllowed));
        assert_eq!(status(OperationKind::Mkcol, 409), Err(DavError::Conflict));
        assert_eq!(status(OperationKind::Mkcol, 403), Err(DavError::Forbidden));
        assert_eq!(status(OperationKind::Mkcol, 507), Err(DavError::Unknown(507)));
    }

    #[test]
    fn test_unlisted_statuses_are_unknown() {
        let mapped: [(OperationKind, &[u16]); 6] = [
            (OperationKind::Get, &[200, 401, 403, 404]),
            (OperationKind::Put, &[201, 204, 403, 409]),
            (OperationKind::Move, &[201, 204, 403, 404, 409, 412]),
            (OperationKind::Copy, &[201, 204, 403, 404, 409, 412]),
            (OperationKind::Delete, &[200, 204, 403, 404]),
            (OperationKind::Mkcol, &[201, 403, 405, 409]),
        ];
        for (kind, listed) in mapped {
            for code in 100..=599u16 {
                let result = status(kind, code);
                if listed.contains(&code) {
                    assert_ne!(result, Err(DavError::Unknown(code)), "{} {}", kind, code);
                } else {
                    assert_eq!(result, Err(DavError::Unknown(code)), "{} {}", kind, code);
                }
            }
        }
    }

    #[test]
    fn test_existing_collection_is_logged_below_warn() {
        assert_eq!(failure_level(OperationKind::Mkcol, &DavError::MethodNotAllowed), Level::DEBUG);
        assert_eq!(failure_level(OperationKind::Mkcol, &DavError::Conflict), Level::WARN);
        assert_eq!(failure_level(OperationKind::Get, &DavError::NotFound), Level::WARN);
        assert_eq!(failure_level(OperationKind::Put, &DavError::Unknown(405)), Level::WARN);
    }
}
