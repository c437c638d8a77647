use std::error::Error;
use std::path::PathBuf;
use structopt::StructOpt;

use aws_config::BehaviorVersion;
use serde::Serialize;
use sm_serve::config::{DEFAULT_BUCKET, DEFAULT_KEY, DEFAULT_LOCAL_PATH};
use sm_serve::{Classifier, Config, ObjectRef};

use log::info;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "sm-classify",
    about = "CLI app to classify an S3 image with a SageMaker endpoint"
)]
struct CmdArgs {
    #[structopt(help = "Name of the SageMaker endpoint")]
    endpoint_name: String,

    #[structopt(long, default_value = DEFAULT_BUCKET, help = "Bucket holding the image")]
    bucket: String,

    #[structopt(long, default_value = DEFAULT_KEY, help = "Object key of the image")]
    key: String,

    #[structopt(
        long,
        parse(from_os_str),
        default_value = DEFAULT_LOCAL_PATH,
        help = "Local path the image is downloaded to"
    )]
    local_path: PathBuf,
}

#[derive(Serialize)]
struct Output<'a> {
    endpoint: &'a str,
    object: &'a ObjectRef,
    class: serde_json::Value,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = CmdArgs::from_args();

    let config = Config::new(&args.endpoint_name)
        .with_object(&args.bucket, &args.key)
        .with_local_path(&args.local_path);

    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let classifier = Classifier::with_aws(config, &sdk_config);

    let class = classifier.classify().await?;

    let output = serde_json::to_string(&Output {
        endpoint: &classifier.config().endpoint_name,
        object: &classifier.config().object,
        class,
    })?;

    info!("{}", output);
    println!("{}", output);

    Ok(())
}
