use kube::CustomResourceExt;

fn main() {
    print!(
        "{}",
        serde_yaml::to_string(&antrea_operator_tools::resources::AntreaInstall::crd()).unwrap()
    )
}
