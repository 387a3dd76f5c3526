pub mod mock;
pub mod service;
pub mod telemetry;

use payloads::{
    APIClient, HouseId, OptionCategory, StatusCode, responses::House,
};
use serde_json::Value;
use service::{Config, MockState, RecordedRequest};
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;

/// Bearer token the mock accepts.
pub const TEST_TOKEN: &str = "test-token";

pub struct TestApp {
    pub port: u16,
    pub client: APIClient,
    pub state: MockState,
}

impl TestApp {
    pub fn address(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// A second client against the same server, e.g. with a stale token.
    pub fn client_with_token(&self, token: Option<&str>) -> APIClient {
        APIClient::new(self.address(), token.map(str::to_string))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests()
    }

    /// How many times `method path` was requested.
    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.is(method, path))
            .count()
    }

    /// The most recent `method path` request.
    pub fn last(&self, method: &str, path: &str) -> Option<RecordedRequest> {
        self.requests()
            .into_iter()
            .rev()
            .find(|r| r.is(method, path))
    }

    /// JSON body of the most recent `method path` request.
    pub fn last_json(&self, method: &str, path: &str) -> Option<Value> {
        self.last(method, path)?.json()
    }

    pub fn clear_requests(&self) {
        self.state.clear_requests();
    }

    /// Script the next `method path` request to answer `status` with
    /// `body`.
    pub fn fail_next(
        &self,
        method: &str,
        path: &str,
        status: u16,
        body: Value,
    ) {
        self.state.fail_next(method, path, status, body);
    }

    /// The house as currently stored by the mock.
    pub fn house(&self, id: &HouseId) -> Option<House> {
        self.state.house(&id.0)
    }

    pub fn set_options(
        &self,
        category: OptionCategory,
        options: &[payloads::responses::ReferenceOption],
    ) {
        self.state.set_options(category, options);
    }
}

/// Root path of a house, as recorded by the mock.
pub fn house_path(id: &HouseId) -> String {
    format!("client/house/{id}")
}

/// Fill a fresh mock with the sample dataset.
pub fn seeded_state(token: &str) -> MockState {
    let state = MockState::new(token);
    state.set_profile(&mock::profile());
    state.insert_house(&mock::house());
    state.insert_house(&mock::guesthouse());
    for category in OptionCategory::ALL {
        state.set_options(category, &mock::reference_options(category));
    }
    let provinces = mock::provinces();
    state.set_provinces(&provinces);
    for province in provinces {
        state.set_cities(province.id, &mock::cities(province.id));
    }
    state
}

pub async fn spawn_app_on_port(port: u16) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let state = seeded_state(TEST_TOKEN);
    let mut config = Config {
        ip: "127.0.0.1".into(),
        port,
    };
    let server = service::build(&mut config, state.clone()).unwrap();
    tokio::spawn(async move {
        if let Err(e) = server.await {
            telemetry::log_error(e);
        }
    });

    TestApp {
        port: config.port,
        client: APIClient::new(
            format!("http://127.0.0.1:{}", config.port),
            Some(TEST_TOKEN.into()),
        ),
        state,
    }
}

/// Use OS-assigned port for parallel testing.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}

/// Assert that the result of an API action results in a specific status code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}
