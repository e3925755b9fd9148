mod helpers;

use ferrous_route_application::ports::DnsResolver;
use ferrous_route_domain::{ClientInfo, Config, ConfigError, DomainError, RuleError};
use ferrous_route_infrastructure::ResolverGraph;
use helpers::{make_query, MockDnsServer, MockReply};
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::RecordType;
use std::net::IpAddr;

fn client(ip: &str) -> ClientInfo {
    ClientInfo::new(ip.parse::<IpAddr>().unwrap())
}

const STATIC_GRAPH: &str = r#"
    root = "main"

    [[resolvers]]
    id = "lan"
    kind = "static"
    rcode = "NOERROR"

    [[resolvers]]
    id = "blackhole"
    kind = "static"
    rcode = "NXDOMAIN"

    [[routers]]
    id = "main"

    [[routers.routes]]
    name = '\.internal\.$'
    type = "A"
    source = "10.0.0.0/8"
    resolver = "lan"

    [[routers.routes]]
    resolver = "blackhole"
"#;

#[tokio::test]
async fn test_graph_routes_through_root() {
    let config = Config::parse(STATIC_GRAPH).unwrap();
    let graph = ResolverGraph::build(&config).unwrap();

    let query = make_query("host.internal.", RecordType::A);

    let inside = graph
        .root()
        .resolve(&query, &client("10.1.2.3"))
        .await
        .unwrap();
    assert_eq!(inside.response_code(), ResponseCode::NoError);
    assert_eq!(inside.id(), query.id());
    assert_eq!(inside.queries(), query.queries());

    let outside = graph
        .root()
        .resolve(&query, &client("8.8.8.8"))
        .await
        .unwrap();
    assert_eq!(outside.response_code(), ResponseCode::NXDomain);

    let metrics = graph.metrics();
    let main = &metrics["main"];
    assert_eq!(main.route["lan"], 1);
    assert_eq!(main.route["blackhole"], 1);
    assert!(main.failure.is_empty());
    assert_eq!(main.available, 2);
}

#[tokio::test]
async fn test_graph_supports_nested_routers() {
    let config = Config::parse(
        r#"
        root = "outer"

        [[resolvers]]
        id = "refuse"
        kind = "static"
        rcode = "REFUSED"

        [[resolvers]]
        id = "ok"
        kind = "static"
        rcode = "NOERROR"

        [[routers]]
        id = "inner"
        [[routers.routes]]
        type = "MX"
        resolver = "refuse"
        [[routers.routes]]
        resolver = "ok"

        [[routers]]
        id = "outer"
        [[routers.routes]]
        name = 'example\.com\.$'
        resolver = "inner"
    "#,
    )
    .unwrap();
    let graph = ResolverGraph::build(&config).unwrap();

    let mx = make_query("example.com.", RecordType::MX);
    let response = graph.root().resolve(&mx, &client("192.0.2.1")).await.unwrap();
    assert_eq!(response.response_code(), ResponseCode::Refused);

    let other = make_query("example.org.", RecordType::A);
    let result = graph.root().resolve(&other, &client("192.0.2.1")).await;
    assert!(matches!(result, Err(DomainError::NoRoute(_))));

    let metrics = graph.metrics();
    assert_eq!(metrics["outer"].route["inner"], 1);
    assert_eq!(metrics["inner"].route["refuse"], 1);
    assert_eq!(graph.routers().len(), 2);
    assert!(graph.get("inner").is_some());
    assert!(graph.get("missing").is_none());
}

#[tokio::test]
async fn test_graph_forwards_to_upstream() {
    let server = MockDnsServer::start(MockReply::Answer).await.unwrap();
    let config = Config::parse(&format!(
        r#"
        [[resolvers]]
        id = "upstream"
        kind = "upstream"
        address = "{}"
        timeout_ms = 2000

        [[routers]]
        id = "main"
        [[routers.routes]]
        resolver = "upstream"
    "#,
        server.addr()
    ))
    .unwrap();
    let graph = ResolverGraph::build(&config).unwrap();

    let query = make_query("example.com.", RecordType::A);
    let response = graph.root().resolve(&query, &client("127.0.0.1")).await.unwrap();

    assert_eq!(response.answers().len(), 1);
    assert_eq!(graph.metrics()["main"].route["upstream"], 1);
}

#[tokio::test]
async fn test_graph_counts_upstream_failures() {
    let server = MockDnsServer::start(MockReply::Garbage).await.unwrap();
    let config = Config::parse(&format!(
        r#"
        [[resolvers]]
        id = "broken"
        kind = "upstream"
        address = "{}"

        [[routers]]
        id = "main"
        [[routers.routes]]
        resolver = "broken"
    "#,
        server.addr()
    ))
    .unwrap();
    let graph = ResolverGraph::build(&config).unwrap();

    let query = make_query("example.com.", RecordType::A);
    let result = graph.root().resolve(&query, &client("127.0.0.1")).await;

    assert!(matches!(result, Err(DomainError::InvalidDnsResponse(_))));
    assert_eq!(graph.metrics()["main"].failure["broken"], 1);
}

#[test]
fn test_graph_reports_bad_route() {
    let config = Config::parse(
        r#"
        [[resolvers]]
        id = "nx"
        kind = "static"

        [[routers]]
        id = "main"
        [[routers.routes]]
        name = "fine"
        resolver = "nx"
        [[routers.routes]]
        source = "10.0.0.0/99"
        resolver = "nx"
    "#,
    )
    .unwrap();

    match ResolverGraph::build(&config) {
        Err(ConfigError::Route {
            router,
            index,
            source,
        }) => {
            assert_eq!(router, "main");
            assert_eq!(index, 1);
            assert!(matches!(source, RuleError::BadCidr { .. }));
        }
        Err(other) => panic!("expected route error, got {other}"),
        Ok(_) => panic!("expected route error"),
    }
}

#[test]
fn test_graph_reports_unknown_type() {
    let config = Config::parse(
        r#"
        [[resolvers]]
        id = "nx"
        kind = "static"

        [[routers]]
        id = "main"
        [[routers.routes]]
        type = "NOPE"
        resolver = "nx"
    "#,
    )
    .unwrap();

    let err = ResolverGraph::build(&config).err().unwrap();
    assert!(matches!(
        err,
        ConfigError::Route {
            source: RuleError::UnknownType(_),
            ..
        }
    ));
}

#[test]
fn test_graph_rejects_invalid_config() {
    let config = Config::parse(
        r#"
        root = "absent"
        [[resolvers]]
        id = "nx"
        kind = "static"
    "#,
    )
    .unwrap();

    assert!(matches!(
        ResolverGraph::build(&config),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn test_root_can_be_plain_resolver() {
    let config = Config::parse(
        r#"
        root = "nx"
        [[resolvers]]
        id = "nx"
        kind = "static"
    "#,
    )
    .unwrap();

    let graph = ResolverGraph::build(&config).unwrap();
    assert_eq!(graph.root().to_string(), "nx");
    assert!(graph.metrics().is_empty());
}
