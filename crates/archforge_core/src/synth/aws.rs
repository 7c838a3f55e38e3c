//! AWS resource synthesis.

use crate::block::BlockSet;

use super::{ProviderSynthesizer, SynthContext};

/// Synthesizer for the AWS provider dialect.
///
/// Networking is a VPC with three public/private subnet pairs spread over
/// the region's availability zones. Compute is EKS with IAM roles as the
/// identity mechanism. Generated database credentials land in Secrets
/// Manager.
pub struct AwsSynthesizer;

impl ProviderSynthesizer for AwsSynthesizer {
    fn synthesize(&self, ctx: &SynthContext<'_>) -> BlockSet {
        let sel = ctx.selection;
        let mut blocks = BlockSet::new();

        blocks.push_if(sel.vpc, "networking", networking(ctx));
        blocks.push_if(sel.vpc && sel.nat_gateway, "nat_gateway", nat_gateway(ctx));
        blocks.push_if(
            sel.vpc && sel.security_groups,
            "security_groups",
            security_groups(ctx),
        );
        blocks.push_if(sel.kubernetes, "kubernetes", cluster(ctx));
        blocks.push_if(
            sel.kubernetes && sel.node_pools,
            "node_pools",
            node_group(ctx),
        );
        blocks.push_if(sel.relational_db, "relational_db", database(ctx));

        blocks
    }
}

fn networking(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();
    format!(
        r#"data "aws_availability_zones" "available" {{
  state = "available"
}}

resource "aws_vpc" "main" {{
  cidr_block           = var.vpc_cidr
  enable_dns_hostnames = true
  enable_dns_support   = true

  tags = {{
    Name        = "{p}-vpc"
    Project     = "{p}"
    Environment = var.environment
  }}
}}

resource "aws_subnet" "public" {{
  count = 3

  vpc_id                  = aws_vpc.main.id
  cidr_block              = cidrsubnet(var.vpc_cidr, 8, count.index)
  availability_zone       = data.aws_availability_zones.available.names[count.index]
  map_public_ip_on_launch = true

  tags = {{
    Name = "{p}-public-${{count.index + 1}}"
    Tier = "public"
  }}
}}

resource "aws_subnet" "private" {{
  count = 3

  vpc_id            = aws_vpc.main.id
  cidr_block        = cidrsubnet(var.vpc_cidr, 8, count.index + 3)
  availability_zone = data.aws_availability_zones.available.names[count.index]

  tags = {{
    Name = "{p}-private-${{count.index + 1}}"
    Tier = "private"
  }}
}}

resource "aws_internet_gateway" "main" {{
  vpc_id = aws_vpc.main.id

  tags = {{
    Name = "{p}-igw"
  }}
}}

resource "aws_route_table" "public" {{
  vpc_id = aws_vpc.main.id

  route {{
    cidr_block = "0.0.0.0/0"
    gateway_id = aws_internet_gateway.main.id
  }}

  tags = {{
    Name = "{p}-public-rt"
  }}
}}

resource "aws_route_table_association" "public" {{
  count = 3

  subnet_id      = aws_subnet.public[count.index].id
  route_table_id = aws_route_table.public.id
}}"#
    )
}

fn nat_gateway(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();
    format!(
        r#"resource "aws_eip" "nat" {{
  domain = "vpc"

  tags = {{
    Name = "{p}-nat-eip"
  }}
}}

resource "aws_nat_gateway" "main" {{
  allocation_id = aws_eip.nat.id
  subnet_id     = aws_subnet.public[0].id

  tags = {{
    Name = "{p}-nat"
  }}

  depends_on = [aws_internet_gateway.main]
}}

resource "aws_route_table" "private" {{
  vpc_id = aws_vpc.main.id

  route {{
    cidr_block     = "0.0.0.0/0"
    nat_gateway_id = aws_nat_gateway.main.id
  }}

  tags = {{
    Name = "{p}-private-rt"
  }}
}}

resource "aws_route_table_association" "private" {{
  count = 3

  subnet_id      = aws_subnet.private[count.index].id
  route_table_id = aws_route_table.private.id
}}"#
    )
}

fn security_groups(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();
    format!(
        r#"resource "aws_security_group" "main" {{
  name        = "{p}-sg"
  description = "Perimeter rules for {p}"
  vpc_id      = aws_vpc.main.id

  ingress {{
    description = "HTTPS from anywhere"
    from_port   = 443
    to_port     = 443
    protocol    = "tcp"
    cidr_blocks = ["0.0.0.0/0"]
  }}

  ingress {{
    description = "Internal traffic"
    from_port   = 0
    to_port     = 0
    protocol    = "-1"
    cidr_blocks = [var.vpc_cidr]
  }}

  egress {{
    from_port   = 0
    to_port     = 0
    protocol    = "-1"
    cidr_blocks = ["0.0.0.0/0"]
  }}

  tags = {{
    Name = "{p}-sg"
  }}
}}"#
    )
}

fn cluster(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();
    let sel = ctx.selection;

    // Subnet attachment only exists alongside the VPC it references.
    let vpc_config = if sel.vpc {
        r#"
  vpc_config {
    subnet_ids = concat(aws_subnet.public[*].id, aws_subnet.private[*].id)
  }
"#
        .to_string()
    } else {
        String::new()
    };

    let mut log_types: Vec<&str> = Vec::new();
    if sel.logging {
        log_types.extend(["api", "audit", "authenticator"]);
    }
    if sel.metrics {
        log_types.extend(["controllerManager", "scheduler"]);
    }
    let observability = if log_types.is_empty() {
        String::new()
    } else {
        let quoted: Vec<String> = log_types.iter().map(|t| format!("\"{t}\"")).collect();
        format!(
            "\n  enabled_cluster_log_types = [{}]\n",
            quoted.join(", ")
        )
    };

    format!(
        r#"resource "aws_iam_role" "cluster" {{
  name = "{p}-eks-cluster-role"

  assume_role_policy = jsonencode({{
    Version = "2012-10-17"
    Statement = [{{
      Action    = "sts:AssumeRole"
      Effect    = "Allow"
      Principal = {{ Service = "eks.amazonaws.com" }}
    }}]
  }})
}}

resource "aws_iam_role_policy_attachment" "cluster" {{
  role       = aws_iam_role.cluster.name
  policy_arn = "arn:aws:iam::aws:policy/AmazonEKSClusterPolicy"
}}

resource "aws_eks_cluster" "main" {{
  name     = "{p}-cluster"
  role_arn = aws_iam_role.cluster.arn
  version  = var.cluster_version
{vpc_config}{observability}
  tags = {{
    Name        = "{p}-cluster"
    Environment = var.environment
  }}

  depends_on = [aws_iam_role_policy_attachment.cluster]
}}"#
    )
}

fn node_group(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();

    let subnet_ids = if ctx.selection.vpc {
        "\n  subnet_ids = aws_subnet.private[*].id\n"
    } else {
        "\n"
    };

    format!(
        r#"resource "aws_iam_role" "nodes" {{
  name = "{p}-eks-node-role"

  assume_role_policy = jsonencode({{
    Version = "2012-10-17"
    Statement = [{{
      Action    = "sts:AssumeRole"
      Effect    = "Allow"
      Principal = {{ Service = "ec2.amazonaws.com" }}
    }}]
  }})
}}

resource "aws_iam_role_policy_attachment" "nodes_worker" {{
  role       = aws_iam_role.nodes.name
  policy_arn = "arn:aws:iam::aws:policy/AmazonEKSWorkerNodePolicy"
}}

resource "aws_iam_role_policy_attachment" "nodes_cni" {{
  role       = aws_iam_role.nodes.name
  policy_arn = "arn:aws:iam::aws:policy/AmazonEKS_CNI_Policy"
}}

resource "aws_iam_role_policy_attachment" "nodes_registry" {{
  role       = aws_iam_role.nodes.name
  policy_arn = "arn:aws:iam::aws:policy/AmazonEC2ContainerRegistryReadOnly"
}}

resource "aws_eks_node_group" "main" {{
  cluster_name    = aws_eks_cluster.main.name
  node_group_name = "{p}-workers"
  node_role_arn   = aws_iam_role.nodes.arn
  instance_types  = [var.node_instance_type]
{subnet_ids}
  scaling_config {{
    desired_size = var.node_desired_count
    min_size     = var.node_min_count
    max_size     = var.node_max_count
  }}

  tags = {{
    Name = "{p}-workers"
  }}

  depends_on = [
    aws_iam_role_policy_attachment.nodes_worker,
    aws_iam_role_policy_attachment.nodes_cni,
    aws_iam_role_policy_attachment.nodes_registry,
  ]
}}"#
    )
}

fn database(ctx: &SynthContext<'_>) -> String {
    let p = ctx.slug.as_str();
    let db_name = ctx.slug.underscored();

    let subnet_group = if ctx.selection.vpc {
        format!(
            r#"resource "aws_db_subnet_group" "main" {{
  name       = "{p}-db-subnets"
  subnet_ids = aws_subnet.private[*].id

  tags = {{
    Name = "{p}-db-subnets"
  }}
}}

"#
        )
    } else {
        String::new()
    };

    let subnet_group_ref = if ctx.selection.vpc {
        "\n  db_subnet_group_name = aws_db_subnet_group.main.name\n"
    } else {
        "\n"
    };

    let hardening = if ctx.environment.is_production() {
        format!(
            r#"  multi_az                  = true
  deletion_protection       = true
  skip_final_snapshot       = false
  final_snapshot_identifier = "{p}-db-final""#
        )
    } else {
        r#"  multi_az            = false
  deletion_protection = false
  skip_final_snapshot = true"#
            .to_string()
    };

    format!(
        r#"resource "random_password" "db" {{
  length  = 32
  special = false
}}

resource "aws_secretsmanager_secret" "db" {{
  name = "{p}-db-credentials"
}}

resource "aws_secretsmanager_secret_version" "db" {{
  secret_id = aws_secretsmanager_secret.db.id

  secret_string = jsonencode({{
    username = "{db_name}_admin"
    password = random_password.db.result
  }})
}}

{subnet_group}resource "aws_db_instance" "main" {{
  identifier        = "{p}-db"
  engine            = "postgres"
  engine_version    = var.db_engine_version
  instance_class    = var.db_instance_class
  allocated_storage = var.db_storage_gb
  db_name           = "{db_name}"
  username          = "{db_name}_admin"
  password          = random_password.db.result
{subnet_group_ref}
  backup_retention_period = var.db_backup_retention_days

{hardening}

  tags = {{
    Name        = "{p}-db"
    Environment = var.environment
  }}
}}"#
    )
}
