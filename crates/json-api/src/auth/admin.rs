//! Admin guard.
//!
//! Must run after the auth middleware, which places the principal in the depot.

use salvo::prelude::*;

use crate::extensions::*;

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let principal = match depot.principal_or_401() {
        Ok(principal) => principal,
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();

            return;
        }
    };

    if !principal.is_admin() {
        res.render(StatusError::forbidden().brief("Administrator access required"));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{inject_admin, inject_customer};

    use super::*;

    #[salvo::handler]
    async fn ok(res: &mut Response) {
        res.render("ok");
    }

    fn guarded() -> Router {
        Router::new().hoop(handler).get(ok)
    }

    #[tokio::test]
    async fn test_admin_passes() -> TestResult {
        let service = Service::new(Router::new().hoop(inject_admin).push(guarded()));

        let res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_returns_403() -> TestResult {
        let service = Service::new(Router::new().hoop(inject_customer).push(guarded()));

        let res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_principal_returns_401() -> TestResult {
        let service = Service::new(guarded());

        let res = TestClient::get("http://example.com").send(&service).await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
