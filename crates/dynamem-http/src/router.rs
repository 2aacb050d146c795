//! Request router.
//!
//! Every request is `POST /` with the operation named in `X-Amz-Target`:
//!
//! ```text
//! X-Amz-Target: DynamoDB_20120810.UpdateItem
//! ```

use dynamem_model::error::StoreError;
use dynamem_model::operations::StoreOperation;

/// The expected prefix for the `X-Amz-Target` header value.
pub const TARGET_PREFIX: &str = "DynamoDB_20120810.";

/// Resolve the operation named by a request's `X-Amz-Target` header.
pub fn resolve_operation(headers: &http::HeaderMap) -> Result<StoreOperation, StoreError> {
    let target = headers
        .get("x-amz-target")
        .ok_or_else(StoreError::missing_action)?;

    let target_str = target
        .to_str()
        .map_err(|_| StoreError::missing_action())?;

    let operation_name = target_str
        .strip_prefix(TARGET_PREFIX)
        .ok_or_else(|| StoreError::unknown_operation(target_str))?;

    StoreOperation::from_name(operation_name)
        .ok_or_else(|| StoreError::unknown_operation(target_str))
}

#[cfg(test)]
mod tests {
    use dynamem_model::error::StoreErrorCode;

    use super::*;

    fn headers_with_target(target: &str) -> http::HeaderMap {
        let mut map = http::HeaderMap::new();
        map.insert("x-amz-target", http::HeaderValue::from_str(target).unwrap());
        map
    }

    #[test]
    fn test_should_resolve_all_operations() {
        let ops = [
            ("DynamoDB_20120810.PutItem", StoreOperation::PutItem),
            ("DynamoDB_20120810.GetItem", StoreOperation::GetItem),
            ("DynamoDB_20120810.UpdateItem", StoreOperation::UpdateItem),
            ("DynamoDB_20120810.DeleteItem", StoreOperation::DeleteItem),
            ("DynamoDB_20120810.ListTables", StoreOperation::ListTables),
            (
                "DynamoDB_20120810.DescribeTable",
                StoreOperation::DescribeTable,
            ),
        ];
        for (target, expected) in ops {
            let op = resolve_operation(&headers_with_target(target)).unwrap();
            assert_eq!(op, expected, "failed for target: {target}");
        }
    }

    #[test]
    fn test_should_error_on_missing_target() {
        let err = resolve_operation(&http::HeaderMap::new()).unwrap_err();
        assert_eq!(err.code, StoreErrorCode::MissingAction);
    }

    #[test]
    fn test_should_error_on_wrong_prefix() {
        let err = resolve_operation(&headers_with_target("WrongService.GetItem")).unwrap_err();
        assert_eq!(err.code, StoreErrorCode::UnrecognizedClientException);
    }

    #[test]
    fn test_should_error_on_unsupported_operation() {
        let err = resolve_operation(&headers_with_target("DynamoDB_20120810.Scan")).unwrap_err();
        assert_eq!(err.code, StoreErrorCode::UnrecognizedClientException);
    }
}
