use anyhow::Context;
use ferrous_route_application::ports::DnsResolver;
use ferrous_route_domain::ClientInfo;
use ferrous_route_infrastructure::ResolverGraph;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{DNSClass, Name, RecordType};
use std::net::IpAddr;
use std::str::FromStr;
use tracing::info;

pub struct QueryArgs {
    pub name: String,
    pub record_type: String,
    pub class: String,
    pub source: IpAddr,
    pub metrics: bool,
}

pub fn build_query(name: &str, record_type: &str, class: &str) -> anyhow::Result<Message> {
    let fqdn = if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{}.", name)
    };
    let name = Name::from_str(&fqdn).with_context(|| format!("Invalid domain name '{}'", fqdn))?;
    let record_type = RecordType::from_str(&record_type.to_ascii_uppercase())
        .with_context(|| format!("Unknown record type '{}'", record_type))?;
    let class = DNSClass::from_str(&class.to_ascii_uppercase())
        .with_context(|| format!("Unknown class '{}'", class))?;

    let mut query = Query::new();
    query.set_name(name);
    query.set_query_type(record_type);
    query.set_query_class(class);

    let mut message = Message::new(fastrand::u16(..), MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(query);
    Ok(message)
}

/// Send one query through the graph's root and print the outcome.
pub async fn run(graph: &ResolverGraph, args: QueryArgs) -> anyhow::Result<()> {
    let message = build_query(&args.name, &args.record_type, &args.class)?;
    let client = ClientInfo::new(args.source).with_listener("cli");

    info!(
        domain = %args.name,
        record_type = %args.record_type,
        client = %args.source,
        "Dispatching query"
    );

    let result = graph.root().resolve(&message, &client).await;

    match &result {
        Ok(response) => {
            println!(";; status: {}", response.response_code());
            for record in response.answers() {
                println!("{}", record);
            }
        }
        Err(e) => println!(";; error: {}", e),
    }

    if args.metrics {
        let metrics = graph.metrics();
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    }

    result.map(|_| ()).map_err(anyhow::Error::from)
}
